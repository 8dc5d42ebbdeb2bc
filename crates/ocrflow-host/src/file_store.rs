//! File store abstraction
//!
//! Abstraction over the hosting platform's file tree. Path resolution
//! distinguishes the expected misses (gone, not a regular file) from store
//! failures, so handlers never parse errors to tell them apart.

use async_trait::async_trait;

use crate::error::HostResult;
use ocrflow_core::models::{FileHandle, FileLookup};

/// Abstraction over the host file tree.
///
/// Whether `write_file` creates a sibling file or a new version of an
/// existing one is the store's decision; callers treat it as an opaque save.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Resolve a path to a file handle, or report why it cannot be handled.
    async fn resolve(&self, path: &str) -> HostResult<FileLookup>;

    /// Read the full content of a resolved file.
    async fn read(&self, file: &FileHandle) -> HostResult<Vec<u8>>;

    /// Write `data` as `filename` inside `directory`.
    async fn write_file(&self, directory: &str, filename: &str, data: Vec<u8>) -> HostResult<()>;
}
