//! User lookup and impersonation session traits
//!
//! The hosting platform owns user management. A job execution impersonates
//! the user a file belongs to before touching the file tree, and must clear
//! that identity before the worker picks up the next job.

use async_trait::async_trait;

use crate::error::HostResult;
use ocrflow_core::models::UserAccount;

/// Lookup of user accounts by id.
#[async_trait]
pub trait UserProvider: Send + Sync {
    /// Resolve a user id to an account. `Ok(None)` means the user does not
    /// exist; `Err` means the lookup itself failed.
    async fn lookup_user(&self, user_id: &str) -> HostResult<Option<UserAccount>>;
}

/// The impersonation context file operations run under.
///
/// One session instance belongs to one job execution at a time. Callers must
/// pair every `set_active_user` with a `clear_active_user` before returning,
/// so a worker reusing the session never inherits a stale identity.
#[async_trait]
pub trait UserSession: Send + Sync {
    /// Make `user` the active identity.
    async fn set_active_user(&self, user: UserAccount) -> HostResult<()>;

    /// Drop the active identity. Clearing an empty session is a no-op.
    async fn clear_active_user(&self) -> HostResult<()>;

    /// The currently active identity, if any.
    async fn active_user(&self) -> Option<UserAccount>;

    /// Mount the user's file tree root (the host's `/{user_id}/files`
    /// equivalent) so subsequent path resolution is scoped to that user.
    async fn init_user_root(&self, user_id: &str) -> HostResult<()>;
}
