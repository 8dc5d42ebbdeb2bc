//! OCR conversion service
//!
//! The façade job handlers call. Dispatches by MIME type through the
//! processor registry and reports the expected misses (nothing registered,
//! input unusable) as outcome variants instead of errors.

use anyhow::Result;
use async_trait::async_trait;

use crate::processor::ProcessError;
use crate::registry::ProcessorRegistry;

/// Outcome of one conversion attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// Conversion succeeded; the serialized text-bearing artifact.
    Converted(Vec<u8>),
    /// The input cannot be converted (empty, corrupt, nothing to recognize).
    NotPossible { reason: String },
    /// No processor is registered for the content type.
    ProcessorNotFound { mime_type: String },
}

/// The conversion seam job handlers depend on.
#[async_trait]
pub trait OcrConverter: Send + Sync {
    /// Convert `data` of type `mime_type`. `Err` means the conversion failed
    /// unexpectedly; expected misses come back as outcome variants.
    async fn convert(&self, mime_type: &str, data: &[u8]) -> Result<ConversionOutcome>;
}

/// OCR service dispatching conversions to registered processors.
pub struct OcrService {
    registry: ProcessorRegistry,
}

impl OcrService {
    pub fn new(registry: ProcessorRegistry) -> Self {
        Self { registry }
    }

    /// Build a service with the enabled shell-out processors, taking tool
    /// paths from `config`.
    pub async fn with_default_processors(config: &ocrflow_core::Config) -> Self {
        let registry = ProcessorRegistry::new();

        #[cfg(feature = "ocr-tesseract")]
        registry
            .register(std::sync::Arc::new(crate::tesseract::TesseractProcessor::new(
                config.tesseract_path.clone(),
                config.tesseract_languages.clone(),
            )))
            .await;

        #[cfg(feature = "ocr-pdftotext")]
        registry
            .register(std::sync::Arc::new(crate::pdftotext::PdftotextProcessor::new(
                config.pdftotext_path.clone(),
            )))
            .await;

        #[cfg(not(any(feature = "ocr-tesseract", feature = "ocr-pdftotext")))]
        let _ = config;

        Self::new(registry)
    }

    pub fn registry(&self) -> &ProcessorRegistry {
        &self.registry
    }
}

#[async_trait]
impl OcrConverter for OcrService {
    #[tracing::instrument(skip(self, data), fields(mime_type = %mime_type, size_bytes = data.len()))]
    async fn convert(&self, mime_type: &str, data: &[u8]) -> Result<ConversionOutcome> {
        if data.is_empty() {
            return Ok(ConversionOutcome::NotPossible {
                reason: "input is empty".to_string(),
            });
        }

        let Some(processor) = self.registry.get(mime_type).await else {
            return Ok(ConversionOutcome::ProcessorNotFound {
                mime_type: mime_type.to_string(),
            });
        };

        tracing::debug!(processor = processor.name(), "Dispatching OCR conversion");

        match processor.process(mime_type, data).await {
            Ok(artifact) => Ok(ConversionOutcome::Converted(artifact)),
            Err(ProcessError::UnusableInput(reason)) => {
                Ok(ConversionOutcome::NotPossible { reason })
            }
            Err(ProcessError::Failed(e)) => Err(e),
        }
    }
}
