//! Authentication entities

use chrono::{DateTime, Utc};

use super::value_objects::{Email, PasswordHash, UserId};

/// A dashboard administrator account
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub username: String,
    pub email: Email,
    /// Hashed password (never expose the raw hash)
    pub password_hash: PasswordHash,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: String, email: Email, password_hash: PasswordHash) -> Self {
        Self {
            user_id: UserId::generate(),
            username,
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
