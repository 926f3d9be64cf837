//! Request and response models for authentication endpoints

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for user signup
#[derive(Debug, Deserialize, ToSchema)]
pub struct SignupRequest {
    /// Display name for the new account
    #[schema(example = "admin")]
    pub username: String,
    /// Email address (unique per account)
    #[schema(example = "admin@example.com")]
    pub email: String,
    /// Plaintext password, hashed server-side
    #[schema(example = "hunter2hunter2")]
    pub password: String,
}

/// Request body for user login
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    #[schema(example = "hunter2hunter2")]
    pub password: String,
}

/// Response for successful signup or login. The session token itself travels
/// in the `Set-Cookie` header, never in the body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    #[schema(example = "Logged IN successfully")]
    pub message: String,
    pub email: String,
    pub username: String,
}

/// Response for logout
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Logged Out Successfully")]
    pub message: String,
}
