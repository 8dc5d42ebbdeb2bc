//! File OCR job handler
//!
//! Takes a queued file path and user id, impersonates the user, resolves the
//! file in the host tree, runs an OCR conversion on its content, and writes
//! the text-bearing result back at the original location.

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::handlers::JobHandler;
use ocrflow_core::models::{split_path, FileLookup, Job, ProcessFilePayload};
use ocrflow_host::{FileStore, UserProvider, UserSession};
use ocrflow_ocr::{ConversionOutcome, OcrConverter};

pub struct ProcessFileJob {
    users: Arc<dyn UserProvider>,
    session: Arc<dyn UserSession>,
    files: Arc<dyn FileStore>,
    ocr: Arc<dyn OcrConverter>,
}

impl ProcessFileJob {
    pub fn new(
        users: Arc<dyn UserProvider>,
        session: Arc<dyn UserSession>,
        files: Arc<dyn FileStore>,
        ocr: Arc<dyn OcrConverter>,
    ) -> Self {
        Self {
            users,
            session,
            files,
            ocr,
        }
    }

    /// Run one file OCR job to completion.
    ///
    /// Never fails from the scheduler's point of view: expected misses end
    /// the job early at warn/info level, anything else is logged at error
    /// level and swallowed. Once the impersonation context has been entered,
    /// it is cleared exactly once before this returns.
    #[tracing::instrument(skip(self, job), fields(job.id = %job.id))]
    pub async fn execute(&self, job: &Job) {
        tracing::debug!(payload = %job.payload, "Starting file OCR job");

        let Some(payload) = self.parse_payload(job) else {
            return;
        };

        let outcome = self.run_impersonated(&payload).await;

        // Teardown runs exactly once, whatever happened above.
        if let Err(e) = self.session.clear_active_user().await {
            tracing::warn!(error = %e, "Failed to clear impersonation context");
        }

        if let Err(e) = outcome {
            tracing::error!(
                error = format!("{:#}", e),
                file_path = %payload.file_path,
                user_id = %payload.user_id,
                "File OCR job failed"
            );
        }
    }

    /// Decode and validate the payload. Incomplete payloads are reported
    /// field by field and turn the job into a no-op.
    fn parse_payload(&self, job: &Job) -> Option<ProcessFilePayload> {
        let payload: ProcessFilePayload = match job.try_payload_as() {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Malformed file OCR job payload");
                return None;
            }
        };

        let missing = payload.missing_fields();
        for field in &missing {
            tracing::warn!("'{}' not set in file OCR job payload", field);
        }

        missing.is_empty().then_some(payload)
    }

    async fn run_impersonated(&self, payload: &ProcessFilePayload) -> Result<()> {
        let user = self
            .users
            .lookup_user(&payload.user_id)
            .await
            .context("User lookup failed")?;
        let Some(user) = user else {
            tracing::warn!(user_id = %payload.user_id, "User was not found, skipping job");
            return Ok(());
        };

        self.session
            .set_active_user(user)
            .await
            .context("Failed to establish impersonation context")?;
        self.session
            .init_user_root(&payload.user_id)
            .await
            .context("Failed to mount user file root")?;

        self.process_file(&payload.file_path).await
    }

    async fn process_file(&self, file_path: &str) -> Result<()> {
        let handle = match self
            .files
            .resolve(file_path)
            .await
            .context("File lookup failed")?
        {
            FileLookup::Found(handle) => handle,
            FileLookup::NotFound => {
                tracing::warn!(file_path = %file_path, "Could not process file, it was not found");
                return Ok(());
            }
            FileLookup::NotAFile => {
                tracing::info!(file_path = %file_path, "Skipping process, path is not a file");
                return Ok(());
            }
        };

        let content = self
            .files
            .read(&handle)
            .await
            .context("Failed to read file content")?;

        let artifact = match self
            .ocr
            .convert(&handle.mime_type, &content)
            .await
            .context("OCR conversion failed")?
        {
            ConversionOutcome::Converted(artifact) => artifact,
            ConversionOutcome::NotPossible { reason } => {
                tracing::info!(file_path = %file_path, reason = %reason, "OCR for file not possible");
                return Ok(());
            }
            ConversionOutcome::ProcessorNotFound { mime_type } => {
                tracing::info!(mime_type = %mime_type, "No OCR processor found for mimetype");
                return Ok(());
            }
        };

        // New file or new version of the original: the store decides.
        let (directory, filename) = split_path(file_path);
        self.files
            .write_file(directory, filename, artifact)
            .await
            .context("Failed to write OCR result")?;

        tracing::info!(file_path = %file_path, "OCR result written");
        Ok(())
    }
}

#[async_trait]
impl JobHandler for ProcessFileJob {
    async fn process(&self, job: &Job) -> Result<()> {
        self.execute(job).await;
        Ok(())
    }
}
