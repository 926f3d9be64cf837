//! Authentication domain errors

use thiserror::Error;

/// Authentication-specific domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown email and mismatched password are reported identically so a
    /// caller cannot probe which accounts exist
    #[error("Invalid Credentials")]
    InvalidCredentials,

    #[error("Already Registered")]
    EmailAlreadyExists,

    #[error("Invalid email format: {email}")]
    InvalidEmail { email: String },

    #[error("All fields are required")]
    MissingFields,

    #[error("Unauthorized: Invalid token")]
    InvalidToken,

    #[error("Unauthorized: Token has expired")]
    TokenExpired,

    #[error("Password hashing failed")]
    HashingFailed,
}
