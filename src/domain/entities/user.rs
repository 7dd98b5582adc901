//! User entity representing an account that owns short links.

use chrono::{DateTime, Utc};

/// A registered account.
///
/// `username` and `email` are stored lowercased, which makes the unique
/// constraints on them case-insensitive in effect. `password_hash` is an
/// argon2id PHC string; the plaintext password never leaves the registration
/// or login request.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub verified: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new user.
///
/// Fields are pre-validated and normalized by the account service before the
/// record reaches the repository.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged. `password_hash` carries an already
/// re-hashed value, never plaintext.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

impl UserPatch {
    /// Returns true when the patch carries no recognized change.
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}
