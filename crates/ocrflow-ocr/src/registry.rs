//! Processor registry keyed by MIME type

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::processor::OcrProcessor;

/// Registry for managing and retrieving OCR processors.
///
/// Thread-safe and async-compatible using tokio's RwLock. Multiple async
/// tasks can look up processors simultaneously without blocking, while
/// registration (typically startup-only) is serialized.
#[derive(Clone, Default)]
pub struct ProcessorRegistry {
    by_mime: Arc<RwLock<HashMap<String, Arc<dyn OcrProcessor>>>>,
}

impl ProcessorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a processor under every MIME type it declares.
    ///
    /// A later registration for the same MIME type replaces the earlier one.
    pub async fn register(&self, processor: Arc<dyn OcrProcessor>) {
        let mut by_mime = self.by_mime.write().await;
        for mime_type in processor.mime_types() {
            by_mime.insert(mime_type.to_string(), processor.clone());
        }
    }

    /// Get the processor registered for a MIME type
    pub async fn get(&self, mime_type: &str) -> Option<Arc<dyn OcrProcessor>> {
        self.by_mime.read().await.get(mime_type).cloned()
    }

    /// Check if any processor handles a MIME type
    pub async fn contains(&self, mime_type: &str) -> bool {
        self.by_mime.read().await.contains_key(mime_type)
    }

    /// List the registered MIME types, sorted
    pub async fn mime_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self.by_mime.read().await.keys().cloned().collect();
        types.sort();
        types
    }
}
