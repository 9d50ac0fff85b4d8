//! Session Types
//!
//! The read-only view of the authentication subsystem that the wishlist
//! consumes: the stored user record and the session accessor shape.

use serde::{Deserialize, Serialize};

/// User record as stored by the authentication subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
}

/// Snapshot of the current session, as the identity reader reports it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user_id: Option<String>,
    pub is_authenticated: bool,
    pub token: Option<String>,
}

impl Session {
    /// Session with no user
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Authenticated session for `user_id`
    pub fn authenticated(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            is_authenticated: true,
            token: Some(token.into()),
        }
    }
}
