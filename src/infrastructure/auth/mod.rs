//! Authentication infrastructure: JWT sessions, argon2id password hashing,
//! and the in-memory user store.

pub mod jwt_service;
pub mod password_hasher;
pub mod user_repository;

pub use jwt_service::JwtService;
pub use password_hasher::PasswordHasher;
pub use user_repository::InMemoryUserRepository;
