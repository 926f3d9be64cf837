//! Authentication use cases

use std::sync::Arc;

use crate::domain::auth::{
    entities::User,
    errors::AuthError,
    repositories::IUserRepository,
    value_objects::{Email, SessionClaims},
};
use crate::infrastructure::auth::{JwtService, PasswordHasher};

/// Outcome of a successful signup or login
#[derive(Debug)]
pub struct SessionResult {
    pub token: String,
    pub email: Email,
    pub username: String,
}

/// Use case for registering a new administrator
pub struct SignupUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
}

impl SignupUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            jwt_service,
        }
    }

    pub async fn execute(
        &self,
        username: String,
        email: Email,
        password: String,
    ) -> Result<SessionResult, AuthError> {
        if username.trim().is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        if self.user_repository.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailAlreadyExists);
        }

        let password_hash = self.password_hasher.hash(password).await?;
        let user = User::new(username, email, password_hash);
        let token = self.jwt_service.generate_session_token(&user)?;

        let result = SessionResult {
            token,
            email: user.email.clone(),
            username: user.username.clone(),
        };
        self.user_repository.save(user).await?;

        Ok(result)
    }
}

/// Use case for administrator login
pub struct LoginUseCase {
    user_repository: Arc<dyn IUserRepository>,
    password_hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
}

impl LoginUseCase {
    pub fn new(
        user_repository: Arc<dyn IUserRepository>,
        password_hasher: Arc<PasswordHasher>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            jwt_service,
        }
    }

    pub async fn execute(&self, email: Email, password: String) -> Result<SessionResult, AuthError> {
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let is_valid = self
            .password_hasher
            .verify(password, user.password_hash.clone())
            .await
            .map_err(|_| AuthError::InvalidCredentials)?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt_service.generate_session_token(&user)?;

        Ok(SessionResult {
            token,
            email: user.email,
            username: user.username,
        })
    }
}

/// Use case for validating the session cookie token
pub struct ValidateTokenUseCase {
    jwt_service: Arc<JwtService>,
}

impl ValidateTokenUseCase {
    pub fn new(jwt_service: Arc<JwtService>) -> Self {
        Self { jwt_service }
    }

    pub fn execute(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.jwt_service.validate_token(token)
    }
}
