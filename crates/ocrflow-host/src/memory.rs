//! In-memory session and user-directory adapters
//!
//! Stand-ins for the host platform's session and user management when the
//! plugin runs outside a full host: a Mutex-held active identity and a fixed
//! user directory. Also the default doubles in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::HostResult;
use crate::session::{UserProvider, UserSession};
use ocrflow_core::models::UserAccount;

/// In-memory impersonation session holding at most one active identity.
#[derive(Default)]
pub struct InMemorySession {
    active: Mutex<Option<UserAccount>>,
    user_root: Mutex<Option<String>>,
}

impl InMemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The mounted user root, if `init_user_root` ran.
    pub fn mounted_root(&self) -> Option<String> {
        self.user_root.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserSession for InMemorySession {
    async fn set_active_user(&self, user: UserAccount) -> HostResult<()> {
        *self.active.lock().unwrap() = Some(user);
        Ok(())
    }

    async fn clear_active_user(&self) -> HostResult<()> {
        *self.active.lock().unwrap() = None;
        *self.user_root.lock().unwrap() = None;
        Ok(())
    }

    async fn active_user(&self) -> Option<UserAccount> {
        self.active.lock().unwrap().clone()
    }

    async fn init_user_root(&self, user_id: &str) -> HostResult<()> {
        *self.user_root.lock().unwrap() = Some(format!("/{}/files", user_id));
        Ok(())
    }
}

/// Fixed user directory backed by a map.
pub struct StaticUserDirectory {
    users: HashMap<String, UserAccount>,
}

impl StaticUserDirectory {
    pub fn new(users: impl IntoIterator<Item = UserAccount>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|user| (user.id.clone(), user))
                .collect(),
        }
    }
}

#[async_trait]
impl UserProvider for StaticUserDirectory {
    async fn lookup_user(&self, user_id: &str) -> HostResult<Option<UserAccount>> {
        Ok(self.users.get(user_id).cloned())
    }
}
