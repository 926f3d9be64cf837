//! Domain Layer - Core entities, value objects, and errors
//!
//! Contains the camera security domain (registry entities, risk value
//! objects, fixed catalogs) and the authentication domain (users,
//! credentials). No I/O happens here.

pub mod auth;
pub mod security;
