use serde::{Deserialize, Serialize};

/// Reference to a regular file in the host file tree.
///
/// Carries the path it was resolved from and the MIME type reported by the
/// file store. Content is fetched separately through the store so handlers
/// only pay for bytes they actually convert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHandle {
    pub path: String,
    pub mime_type: String,
}

impl FileHandle {
    pub fn new(path: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Outcome of resolving a path in the host file tree.
///
/// Missing paths and non-file nodes are expected conditions, not errors;
/// store failures (I/O, permission) surface as `Err` from the store instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileLookup {
    Found(FileHandle),
    NotFound,
    NotAFile,
}

/// Split a file path into (directory, file name).
///
/// Follows dirname/basename semantics: `/docs/scan.pdf` -> (`/docs`,
/// `scan.pdf`), `/scan.pdf` -> (`/`, `scan.pdf`), `scan.pdf` -> (`.`,
/// `scan.pdf`).
pub fn split_path(path: &str) -> (&str, &str) {
    match path.rfind('/') {
        Some(0) => ("/", &path[1..]),
        Some(idx) => (&path[..idx], &path[idx + 1..]),
        None => (".", path),
    }
}
