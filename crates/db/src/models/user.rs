//! User entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::session::SessionKind;
use todo_core::types::{DbId, Timestamp};

/// One entry of a user's session list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub kind: SessionKind,
    pub token: String,
}

/// Full user row from the `users` table.
///
/// Contains the password hash and live session tokens -- NEVER serialize this
/// to API responses directly. Use [`UserResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub email: String,
    pub password_hash: String,
    #[sqlx(json)]
    pub sessions: Vec<Session>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl User {
    /// Whether `token` is currently a live session of the given kind.
    pub fn has_session(&self, kind: SessionKind, token: &str) -> bool {
        self.sessions
            .iter()
            .any(|s| s.kind == kind && s.token == token)
    }
}

/// Public user representation: identity and email only.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    #[serde(rename = "_id")]
    pub id: DbId,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// DTO for inserting a new user. Carries the hash, never the plaintext.
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub email: String,
    pub password_hash: String,
}
