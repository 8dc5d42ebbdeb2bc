//! ocrflow Host Adapters
//!
//! Boundary traits for the collaborators the hosting platform provides (user
//! lookup, impersonation session, file tree) plus the adapters this repo
//! ships: a local-filesystem file store and in-memory session/user-directory
//! implementations for embedding and tests.

mod error;
mod file_store;
mod local;
mod memory;
mod session;

pub use error::{HostError, HostResult};
pub use file_store::FileStore;
pub use local::LocalFileStore;
pub use memory::{InMemorySession, StaticUserDirectory};
pub use session::{UserProvider, UserSession};
