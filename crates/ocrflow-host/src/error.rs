use thiserror::Error;

/// Host adapter errors
#[derive(Debug, Error)]
pub enum HostError {
    #[error("User lookup failed: {0}")]
    UserLookup(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("File store error: {0}")]
    Store(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for host adapter operations
pub type HostResult<T> = Result<T, HostError>;
