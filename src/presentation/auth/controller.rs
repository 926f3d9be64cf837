//! Authentication controller endpoints

use axum::{
    extract::State,
    http::{StatusCode, header},
    response::Json,
};
use std::sync::Arc;

use crate::application::auth::use_cases::{LoginUseCase, SignupUseCase};
use crate::domain::auth::{errors::AuthError, value_objects::Email};
use crate::presentation::auth::extractors::SESSION_COOKIE;
use crate::presentation::auth::models::*;
use crate::presentation::models::ErrorResponse;

/// State for auth endpoints
#[derive(Clone)]
pub struct AuthAppState {
    pub signup_use_case: Arc<SignupUseCase>,
    pub login_use_case: Arc<LoginUseCase>,
    pub token_ttl_hours: u64,
    pub secure_cookies: bool,
}

impl AuthAppState {
    /// `Set-Cookie` value carrying the session token. `SameSite=None` needs
    /// `Secure` or browsers drop the cookie, so the two flags travel together.
    fn session_cookie(&self, token: &str) -> String {
        let max_age = self.token_ttl_hours * 3600;
        if self.secure_cookies {
            format!(
                "{SESSION_COOKIE}={token}; Path=/; HttpOnly; Secure; SameSite=None; Max-Age={max_age}"
            )
        } else {
            format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age}")
        }
    }

    fn clearing_cookie(&self) -> String {
        if self.secure_cookies {
            format!("{SESSION_COOKIE}=; Path=/; HttpOnly; Secure; SameSite=None; Max-Age=0")
        } else {
            format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
        }
    }
}

type AuthFailure = (StatusCode, Json<ErrorResponse>);

fn auth_error_to_response(code: &str, error: AuthError) -> AuthFailure {
    let status = match &error {
        AuthError::InvalidCredentials => StatusCode::NOT_FOUND,
        AuthError::EmailAlreadyExists => StatusCode::CONFLICT,
        AuthError::MissingFields => StatusCode::BAD_REQUEST,
        AuthError::InvalidEmail { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ErrorResponse::new(code, error.to_string())))
}

/// Signup endpoint
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created, session cookie set", body = SessionResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 409, description = "Email already registered", body = ErrorResponse)
    )
)]
pub async fn signup(
    State(state): State<AuthAppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<SessionResponse>), AuthFailure> {
    if request.username.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return Err(auth_error_to_response("MISSING_FIELDS", AuthError::MissingFields));
    }

    let email = Email::new(request.email).map_err(|message| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new("INVALID_EMAIL", message)),
        )
    })?;

    let result = state
        .signup_use_case
        .execute(request.username, email, request.password)
        .await
        .map_err(|e| auth_error_to_response("SIGNUP_FAILED", e))?;

    Ok((
        StatusCode::CREATED,
        [(header::SET_COOKIE, state.session_cookie(&result.token))],
        Json(SessionResponse {
            message: "Admin Registered Successfully".to_string(),
            email: result.email.as_str().to_string(),
            username: result.username,
        }),
    ))
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful, session cookie set", body = SessionResponse),
        (status = 400, description = "Missing or invalid fields", body = ErrorResponse),
        (status = 404, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, [(header::HeaderName, String); 1], Json<SessionResponse>), AuthFailure> {
    if request.email.trim().is_empty() || request.password.is_empty() {
        return Err(auth_error_to_response("MISSING_FIELDS", AuthError::MissingFields));
    }

    // Unknown address and wrong password fail the same way, so probing
    // for registered emails learns nothing.
    let email = Email::new(request.email)
        .map_err(|_| auth_error_to_response("LOGIN_FAILED", AuthError::InvalidCredentials))?;

    let result = state
        .login_use_case
        .execute(email, request.password)
        .await
        .map_err(|e| auth_error_to_response("LOGIN_FAILED", e))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, state.session_cookie(&result.token))],
        Json(SessionResponse {
            message: "Logged IN successfully".to_string(),
            email: result.email.as_str().to_string(),
            username: result.username,
        }),
    ))
}

/// Logout endpoint. Stateless tokens cannot be revoked server-side, so
/// logout just expires the cookie in the browser.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session cookie cleared", body = LogoutResponse)
    )
)]
pub async fn logout(
    State(state): State<AuthAppState>,
) -> (StatusCode, [(header::HeaderName, String); 1], Json<LogoutResponse>) {
    (
        StatusCode::OK,
        [(header::SET_COOKIE, state.clearing_cookie())],
        Json(LogoutResponse {
            message: "Logged Out Successfully".to_string(),
        }),
    )
}
