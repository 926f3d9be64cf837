//! Camguard - camera security monitoring backend
//!
//! In-memory camera registry with a risk scoring model, a randomized
//! intrusion/activity simulation, cookie-session authentication, and a
//! WebSocket channel pushing registry changes to connected dashboards.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

mod app;

pub use app::{AppHandle, create_app};
pub use config::Config;
pub use logging::init_tracing;
