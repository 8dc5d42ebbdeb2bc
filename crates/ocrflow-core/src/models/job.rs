use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum JobKind {
    ProcessFile,
}

impl Display for JobKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            JobKind::ProcessFile => write!(f, "process_file"),
        }
    }
}

impl FromStr for JobKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "process_file" => Ok(JobKind::ProcessFile),
            _ => Err(anyhow::anyhow!("Invalid job kind: {}", s)),
        }
    }
}

/// A queued unit of work as delivered to a handler.
///
/// The payload is carried as JSON and decoded once at the handler boundary
/// via [`Job::try_payload_as`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub kind: JobKind,
    pub payload: serde_json::Value,
    pub submitted_at: DateTime<Utc>,
}

impl Job {
    pub fn new(kind: JobKind, payload: serde_json::Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            payload,
            submitted_at: Utc::now(),
        }
    }

    /// Extract the payload as a typed struct.
    /// Returns None if deserialization fails.
    pub fn payload_as<P: JobPayload>(&self) -> Option<P> {
        serde_json::from_value(self.payload.clone()).ok()
    }

    /// Extract the payload as a typed struct, returning an error on failure.
    pub fn try_payload_as<P: JobPayload>(&self) -> Result<P, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }

    /// Create a payload value from a typed struct.
    /// Use this when submitting jobs to ensure type consistency.
    pub fn payload_from<P: JobPayload>(payload: &P) -> serde_json::Value {
        serde_json::to_value(payload).unwrap_or_default()
    }
}

/// Trait for type-safe job payloads
pub trait JobPayload: Serialize + for<'de> Deserialize<'de> {
    fn kind() -> JobKind;
}

/// Payload of a file OCR job: which file to convert, and on whose behalf.
///
/// Both fields are required; the handler treats a payload with either field
/// missing or blank as a no-op. Fields default to empty rather than failing
/// deserialization so each gap can be reported individually.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessFilePayload {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub user_id: String,
}

impl ProcessFilePayload {
    /// Names of required fields that are missing or blank, in declaration
    /// order. Empty means the payload is complete.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.file_path.trim().is_empty() {
            missing.push("file_path");
        }
        if self.user_id.trim().is_empty() {
            missing.push("user_id");
        }
        missing
    }
}

impl JobPayload for ProcessFilePayload {
    fn kind() -> JobKind {
        JobKind::ProcessFile
    }
}
