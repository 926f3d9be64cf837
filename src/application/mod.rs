//! Application Layer - Use cases and services

pub mod auth;
pub mod security;
