//! JWT service for session token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use std::sync::Arc;

use crate::domain::auth::{
    entities::User,
    errors::AuthError,
    value_objects::SessionClaims,
};

/// Issues and validates the HS256 session tokens carried by the cookie
#[derive(Clone)]
pub struct JwtService {
    secret: Arc<String>,
    token_ttl_hours: u64,
}

impl JwtService {
    pub fn new(secret: String, token_ttl_hours: u64) -> Self {
        Self {
            secret: Arc::new(secret),
            token_ttl_hours,
        }
    }

    pub fn token_ttl_hours(&self) -> u64 {
        self.token_ttl_hours
    }

    /// Generate a session token for a user
    pub fn generate_session_token(&self, user: &User) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.token_ttl_hours as i64);

        let claims = SessionClaims {
            sub: user.user_id.as_uuid(),
            email: user.email.to_string(),
            username: user.username.clone(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let header = Header::default();
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&header, &claims, &encoding_key).map_err(|e| {
            tracing::error!("Failed to encode session token: {}", e);
            AuthError::InvalidToken
        })
    }

    /// Validate and decode a session token
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let mut validation = Validation::default();
        validation.validate_exp = true;

        decode::<SessionClaims>(token, &decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Token validation failed: {}", e);
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::value_objects::{Email, PasswordHash};

    fn test_user() -> User {
        User::new(
            "admin".to_string(),
            Email::new("admin@example.com".to_string()).unwrap(),
            PasswordHash::from("$argon2id$stub".to_string()),
        )
    }

    #[test]
    fn token_round_trip() {
        let service = JwtService::new(
            "test-secret-key-at-least-32-characters-long".to_string(),
            16,
        );
        let user = test_user();

        let token = service.generate_session_token(&user).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), user.user_id);
        assert_eq!(claims.email, "admin@example.com");
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn garbage_token_is_invalid() {
        let service = JwtService::new(
            "test-secret-key-at-least-32-characters-long".to_string(),
            16,
        );
        assert_eq!(
            service.validate_token("not-a-jwt"),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let issuing = JwtService::new("a".repeat(32), 16);
        let validating = JwtService::new("b".repeat(32), 16);
        let token = issuing.generate_session_token(&test_user()).unwrap();
        assert_eq!(
            validating.validate_token(&token),
            Err(AuthError::InvalidToken)
        );
    }
}
