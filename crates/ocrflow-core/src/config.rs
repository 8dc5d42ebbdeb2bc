//! Configuration module
//!
//! Runtime settings for the job queue, the host file tree adapter, and the
//! OCR tool invocations. Everything is read from the environment once at
//! startup; the host platform owns any richer configuration surface.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

// Common constants
const MAX_WORKERS: usize = 4;
const QUEUE_CAPACITY: usize = 64;
const JOB_TIMEOUT_SECS: u64 = 600;
const FILES_ROOT: &str = "/var/lib/ocrflow/files";
const TESSERACT_BIN: &str = "tesseract";
const PDFTOTEXT_BIN: &str = "pdftotext";

/// Application configuration for the ocrflow worker.
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    /// Maximum number of jobs processed concurrently.
    pub max_workers: usize,
    /// Capacity of the in-process job submission channel.
    pub queue_capacity: usize,
    /// Per-job execution timeout in seconds.
    pub job_timeout_seconds: u64,
    /// Root of the host file tree when running with the local file store.
    pub files_root: PathBuf,
    /// Path to the tesseract binary.
    pub tesseract_path: String,
    /// Languages passed to tesseract via `-l` (e.g. "eng+deu"). None uses
    /// the tool's default.
    pub tesseract_languages: Option<String>,
    /// Path to the pdftotext binary.
    pub pdftotext_path: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: env::var("OCRFLOW_ENV").unwrap_or_else(|_| "development".to_string()),
            max_workers: parse_var("OCRFLOW_MAX_WORKERS", MAX_WORKERS)?,
            queue_capacity: parse_var("OCRFLOW_QUEUE_CAPACITY", QUEUE_CAPACITY)?,
            job_timeout_seconds: parse_var("OCRFLOW_JOB_TIMEOUT_SECONDS", JOB_TIMEOUT_SECS)?,
            files_root: env::var("OCRFLOW_FILES_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(FILES_ROOT)),
            tesseract_path: env::var("OCRFLOW_TESSERACT_PATH")
                .unwrap_or_else(|_| TESSERACT_BIN.to_string()),
            tesseract_languages: env::var("OCRFLOW_TESSERACT_LANGUAGES").ok(),
            pdftotext_path: env::var("OCRFLOW_PDFTOTEXT_PATH")
                .unwrap_or_else(|_| PDFTOTEXT_BIN.to_string()),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            max_workers: MAX_WORKERS,
            queue_capacity: QUEUE_CAPACITY,
            job_timeout_seconds: JOB_TIMEOUT_SECS,
            files_root: PathBuf::from(FILES_ROOT),
            tesseract_path: TESSERACT_BIN.to_string(),
            tesseract_languages: None,
            pdftotext_path: PDFTOTEXT_BIN.to_string(),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .with_context(|| format!("Invalid value for {}: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}
