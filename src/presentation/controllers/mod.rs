//! HTTP controllers

pub mod health;
pub mod security;
