//! Configuration validation module

use crate::config::{AuthConfig, ServerConfig, SimulationConfig};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Authentication configuration error: {message}")]
    Auth { message: String },

    #[error("Simulation configuration error: {message}")]
    Simulation { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn simulation(message: impl Into<String>) -> Self {
        Self::Simulation {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.host.trim().is_empty() {
            return Err(ValidationError::server("host must not be empty"));
        }
        if self.port == 0 {
            return Err(ValidationError::server("port must be non-zero"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "request_timeout_seconds must be non-zero",
            ));
        }
        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.trim().is_empty() {
            return Err(ValidationError::auth(
                "jwt_secret must be set (CAMGUARD__AUTH__JWT_SECRET)",
            ));
        }
        if self.jwt_secret.len() < 32 {
            return Err(ValidationError::auth(
                "jwt_secret must be at least 32 characters",
            ));
        }
        if self.token_ttl_hours == 0 {
            return Err(ValidationError::auth("token_ttl_hours must be non-zero"));
        }
        Ok(())
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.enabled {
            if self.intrusion_interval_seconds == 0 || self.activity_interval_seconds == 0 {
                return Err(ValidationError::simulation(
                    "worker intervals must be non-zero",
                ));
            }
            if !(0.0..=1.0).contains(&self.activity_probability) {
                return Err(ValidationError::simulation(
                    "activity_probability must be within [0, 1]",
                ));
            }
        }
        Ok(())
    }
}
