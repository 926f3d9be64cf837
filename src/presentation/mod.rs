//! Presentation Layer - HTTP/WS interface
//!
//! Router assembly, controllers, wire DTOs, the cookie session extractor,
//! and the WebSocket fan-out handler.

pub mod auth;
pub mod controllers;
pub mod models;
pub mod routes;
pub mod ws;

pub use routes::create_router;
