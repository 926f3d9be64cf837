//! Session authentication surface: signup/login/logout controllers and the
//! cookie extractor.

pub mod controller;
pub mod extractors;
pub mod models;

pub use controller::AuthAppState;
pub use extractors::{AuthState, SessionUser, SESSION_COOKIE};
