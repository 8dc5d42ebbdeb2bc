//! OCR processor trait
//!
//! A processor converts the bytes of one supported content type into a
//! text-bearing artifact. Unusable input (blank page, corrupt file) is a
//! distinct condition from a failing tool, so callers can skip the former
//! without masking the latter.

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

/// Processor failure modes
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input cannot be converted (corrupt, empty, nothing to recognize).
    /// Expected; callers skip the file.
    #[error("Input not processable: {0}")]
    UnusableInput(String),

    /// The conversion itself failed (tool missing, crashed, I/O).
    #[error(transparent)]
    Failed(#[from] anyhow::Error),
}

/// Trait that all OCR processors must implement
#[async_trait]
pub trait OcrProcessor: Send + Sync + Debug {
    /// Processor name/identifier
    fn name(&self) -> &str;

    /// MIME types this processor accepts
    fn mime_types(&self) -> &[&'static str];

    /// Convert `data` of type `mime_type` into the serialized bytes of a
    /// text-bearing artifact. `mime_type` is one of [`Self::mime_types`].
    async fn process(&self, mime_type: &str, data: &[u8]) -> Result<Vec<u8>, ProcessError>;
}
