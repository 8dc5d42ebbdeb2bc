//! Text extraction for PDFs via the `pdftotext` CLI tool from poppler-utils.
//!
//! This misses "non-searchable" scanned pages, but covers the common case of
//! PDFs whose text layer just needs extracting.

use anyhow::Context;
use async_trait::async_trait;
use tokio::process::Command;

use crate::exec::{check_tool_failure, run_tool};
use crate::processor::{OcrProcessor, ProcessError};

const MIME_TYPES: &[&'static str] = &["application/pdf"];

const UNUSABLE_MARKERS: &[&str] = &[
    "May not be a PDF file",
    "Syntax Error",
    "Document is encrypted",
];

/// PDF text extraction via the system `pdftotext` binary.
#[derive(Debug, Clone)]
pub struct PdftotextProcessor {
    binary: String,
}

impl PdftotextProcessor {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for PdftotextProcessor {
    fn default() -> Self {
        Self::new("pdftotext")
    }
}

#[async_trait]
impl OcrProcessor for PdftotextProcessor {
    fn name(&self) -> &str {
        "pdftotext"
    }

    fn mime_types(&self) -> &[&'static str] {
        MIME_TYPES
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn process(&self, _mime_type: &str, data: &[u8]) -> Result<Vec<u8>, ProcessError> {
        let tmpdir = tempfile::TempDir::with_prefix("pdftotext")
            .context("cannot create pdftotext temp dir")
            .map_err(ProcessError::Failed)?;
        let input_path = tmpdir.path().join("input.pdf");
        let output_path = tmpdir.path().join("output.txt");

        tokio::fs::write(&input_path, data)
            .await
            .context("cannot write pdftotext input file")
            .map_err(ProcessError::Failed)?;

        let mut command = Command::new(&self.binary);
        command.arg("-layout").arg(&input_path).arg(&output_path);

        let output = run_tool("pdftotext", &mut command).await?;
        check_tool_failure("pdftotext", &output, UNUSABLE_MARKERS)?;

        let text = tokio::fs::read(&output_path)
            .await
            .context("cannot read pdftotext output file")
            .map_err(ProcessError::Failed)?;

        if String::from_utf8_lossy(&text).trim().is_empty() {
            return Err(ProcessError::UnusableInput(
                "document has no extractable text".to_string(),
            ));
        }

        Ok(text)
    }
}
