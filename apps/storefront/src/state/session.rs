//! # Session State
//!
//! Tracks who is logged in.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   (no user) ── login / register ──► Some(User) ── logout ──► (no user)  │
//! │                                        │                                │
//! │                                        └── update_settings refreshes    │
//! │                                            name and phone in place      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every cart, order and settings command reads the user from here instead
//! of trusting an id passed in by the GUI.

use std::sync::{Arc, Mutex, MutexGuard};

use cozy_core::User;

use crate::error::ApiError;

/// The logged-in user, shared between commands.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    current: Arc<Mutex<Option<User>>>,
}

impl SessionState {
    /// Creates a session with nobody logged in.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<User>> {
        // A panic while holding the lock cannot leave a half-written
        // Option<User>, so the poisoned value is still usable.
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(Option<&User>) -> R,
    {
        let session = self.lock();
        f(session.as_ref())
    }

    /// Replaces the current user.
    pub fn sign_in(&self, user: User) {
        *self.lock() = Some(user);
    }

    /// Clears the session. Returns the user that was logged in.
    pub fn sign_out(&self) -> Option<User> {
        self.lock().take()
    }

    /// A copy of the logged-in user, if any.
    pub fn current(&self) -> Option<User> {
        self.with_session(|user| user.cloned())
    }

    /// The logged-in user, or `UNAUTHORIZED`.
    pub fn require_user(&self) -> Result<User, ApiError> {
        self.current()
            .ok_or_else(|| ApiError::unauthorized("Please log in first"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cozy_core::UserRole;

    fn user() -> User {
        User {
            id: 1,
            phone: "+79161234567".to_string(),
            role: UserRole::Seller,
            name: "Ivan Ivanov".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sign_in_and_out() {
        let session = SessionState::new();
        assert!(session.current().is_none());
        assert!(session.require_user().is_err());

        session.sign_in(user());
        assert_eq!(session.require_user().unwrap().id, 1);
        assert!(session.with_session(|u| u.map(|u| u.is_seller()).unwrap_or(false)));

        let previous = session.sign_out();
        assert_eq!(previous.map(|u| u.id), Some(1));
        assert!(session.current().is_none());
    }

    #[test]
    fn test_clones_share_the_session() {
        let session = SessionState::new();
        let other = session.clone();
        session.sign_in(user());
        assert!(other.current().is_some());
    }
}
