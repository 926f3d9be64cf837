//! Security domain errors

use thiserror::Error;

/// Errors surfaced by registry operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("Camera not found: {camera_id}")]
    CameraNotFound { camera_id: String },

    #[error("Unknown hardening action: {action}")]
    UnknownAction { action: String },

    #[error("{message}")]
    Validation { message: String },
}

impl SecurityError {
    pub fn validation(message: impl Into<String>) -> Self {
        SecurityError::Validation {
            message: message.into(),
        }
    }
}
