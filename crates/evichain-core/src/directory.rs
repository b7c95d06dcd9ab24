//! Read-only user directory.
//!
//! The demo has no credential store: any non-empty password is accepted for
//! a user on the roster.

use std::collections::HashMap;

use crate::error::{EvichainError, Result};
use crate::types::{Role, UserProfile};

/// Lookup capability over the set of known users.
pub trait UserDirectory: Send + Sync {
    /// Find a user by username (case-insensitive).
    fn lookup(&self, username: &str) -> Option<UserProfile>;

    /// Check credentials and return the matching profile.
    fn authenticate(&self, username: &str, password: &str) -> Result<UserProfile> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(EvichainError::Authentication(
                "username and password are required".to_string(),
            ));
        }
        self.lookup(username)
            .ok_or_else(|| EvichainError::Authentication(format!("unknown user: {}", username)))
    }
}

/// Fixed in-memory roster.
pub struct InMemoryUserDirectory {
    users: HashMap<String, UserProfile>,
}

impl InMemoryUserDirectory {
    /// Create a directory from an explicit list of profiles.
    pub fn new(users: impl IntoIterator<Item = UserProfile>) -> Self {
        Self {
            users: users
                .into_iter()
                .map(|u| (u.username.to_lowercase(), u))
                .collect(),
        }
    }

    /// The roster used by the demo terminal.
    pub fn with_demo_users() -> Self {
        Self::new([
            UserProfile::new("officer002", "Officer #002", Role::Officer),
            UserProfile::new("lab_a", "Digital Lab A", Role::ForensicAnalyst),
            UserProfile::new("legal", "Legal Team", Role::LegalReviewer),
            UserProfile::new("admin", "Node Administrator", Role::Administrator),
        ])
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    fn lookup(&self, username: &str) -> Option<UserProfile> {
        self.users.get(&username.trim().to_lowercase()).cloned()
    }
}
