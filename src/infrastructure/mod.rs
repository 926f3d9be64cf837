//! Infrastructure Layer - Concrete adapters
//!
//! Auth services (JWT, argon2, in-memory user store), the entropy seam the
//! simulation draws from, the broadcast event publisher, and the periodic
//! simulation workers.

pub mod auth;
pub mod entropy;
pub mod events;
pub mod simulation;
