//! OCR processor wrapping the `tesseract` CLI tool.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use tokio::process::Command;

use crate::exec::{check_tool_failure, run_tool};
use crate::processor::{OcrProcessor, ProcessError};

const MIME_TYPES: &[&'static str] = &[
    "image/png",
    "image/jpeg",
    "image/tiff",
    "image/bmp",
    "image/webp",
    "image/gif",
];

// Leptonica/tesseract stderr lines that mean the image itself is unusable.
const UNUSABLE_MARKERS: &[&str] = &[
    "Error in pixReadMem",
    "Unsupported image type",
    "Image too small to scale",
];

/// Raster-image OCR via the system `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractProcessor {
    binary: String,
    languages: Option<String>,
}

impl TesseractProcessor {
    /// Create a processor invoking `binary`, passing `languages` as `-l`
    /// when set (e.g. "eng+deu").
    pub fn new(binary: impl Into<String>, languages: Option<String>) -> Self {
        Self {
            binary: binary.into(),
            languages,
        }
    }
}

impl Default for TesseractProcessor {
    fn default() -> Self {
        Self::new("tesseract", None)
    }
}

#[async_trait]
impl OcrProcessor for TesseractProcessor {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn mime_types(&self) -> &[&'static str] {
        MIME_TYPES
    }

    #[tracing::instrument(level = "debug", skip_all, fields(mime_type = %mime_type))]
    async fn process(&self, mime_type: &str, data: &[u8]) -> Result<Vec<u8>, ProcessError> {
        let extension = mime_guess::get_mime_extensions_str(mime_type)
            .and_then(|candidates| candidates.first())
            .ok_or_else(|| {
                ProcessError::Failed(anyhow!("cannot determine extension for {}", mime_type))
            })?;

        // Write the input to a temporary file for the tool to consume.
        let tmpdir = tempfile::TempDir::with_prefix("tesseract")
            .context("cannot create tesseract temp dir")
            .map_err(ProcessError::Failed)?;
        let input_path = tmpdir.path().join(format!("input.{}", extension));
        let output_base = tmpdir.path().join("output");

        tokio::fs::write(&input_path, data)
            .await
            .context("cannot write tesseract input file")
            .map_err(ProcessError::Failed)?;

        let mut command = Command::new(&self.binary);
        command.arg(&input_path).arg(&output_base);
        if let Some(languages) = &self.languages {
            command.arg("-l").arg(languages);
        }

        let output = run_tool("tesseract", &mut command).await?;
        check_tool_failure("tesseract", &output, UNUSABLE_MARKERS)?;

        tokio::fs::read(output_base.with_extension("txt"))
            .await
            .context("cannot read tesseract output file")
            .map_err(ProcessError::Failed)
    }
}
