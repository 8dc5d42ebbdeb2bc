//! ocrflow OCR
//!
//! This crate provides the OCR conversion service: the processor trait, a
//! MIME-keyed registry, and the service façade handlers call. Concrete
//! processors shell out to system tools and are feature-gated per tool.

pub mod processor;
pub mod registry;
pub mod service;

#[cfg(any(feature = "ocr-tesseract", feature = "ocr-pdftotext"))]
mod exec;

#[cfg(feature = "ocr-pdftotext")]
pub mod pdftotext;
#[cfg(feature = "ocr-tesseract")]
pub mod tesseract;

// Re-export commonly used types
pub use processor::{OcrProcessor, ProcessError};
pub use registry::ProcessorRegistry;
pub use service::{ConversionOutcome, OcrConverter, OcrService};

#[cfg(feature = "ocr-pdftotext")]
pub use pdftotext::PdftotextProcessor;
#[cfg(feature = "ocr-tesseract")]
pub use tesseract::TesseractProcessor;
