//! Authentication extractors for Axum (cookie-based sessions)

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use axum::Json;
use std::sync::Arc;

use crate::application::auth::use_cases::ValidateTokenUseCase;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::value_objects::UserId;
use crate::presentation::models::ErrorResponse;

/// Name of the session cookie carrying the signed JWT.
pub const SESSION_COOKIE: &str = "cameraJWT";

/// Authenticated user information extracted from the session cookie
#[derive(Debug, Clone)]
pub struct SessionUser {
    pub user_id: UserId,
    pub email: String,
    pub username: String,
}

/// State for authentication extractors, injected into request extensions
#[derive(Clone)]
pub struct AuthState {
    pub validate_token: Arc<ValidateTokenUseCase>,
}

/// Helper function to extract a cookie value from request parts
fn extract_cookie_from_parts(parts: &Parts, cookie_name: &str) -> Option<String> {
    parts
        .headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .map(|s| s.trim())
        .find(|s| s.starts_with(&format!("{}=", cookie_name)))?
        .strip_prefix(&format!("{}=", cookie_name))
        .map(|s| s.to_string())
}

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
{
    type Rejection = AuthErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or_else(|| AuthErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "CONFIGURATION_ERROR",
                message: "Auth state not found in request extensions".to_string(),
            })?;

        let token =
            extract_cookie_from_parts(parts, SESSION_COOKIE).ok_or_else(|| AuthErrorResponse {
                status: StatusCode::UNAUTHORIZED,
                code: "NO_TOKEN",
                message: "Unauthorized: No token provided".to_string(),
            })?;

        let claims = auth_state
            .validate_token
            .execute(&token)
            .map_err(|e| match e {
                AuthError::TokenExpired => AuthErrorResponse {
                    status: StatusCode::UNAUTHORIZED,
                    code: "TOKEN_EXPIRED",
                    message: "Unauthorized: Token has expired".to_string(),
                },
                _ => AuthErrorResponse {
                    status: StatusCode::UNAUTHORIZED,
                    code: "INVALID_TOKEN",
                    message: "Unauthorized: Invalid token".to_string(),
                },
            })?;

        Ok(SessionUser {
            user_id: claims.user_id(),
            email: claims.email,
            username: claims.username,
        })
    }
}

/// Error response for authentication failures
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.code, self.message))).into_response()
    }
}
