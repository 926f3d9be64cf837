//! Authentication domain: users, credentials, and the repository seam.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::User;
pub use errors::AuthError;
pub use repositories::IUserRepository;
pub use value_objects::{Email, PasswordHash, SessionClaims, UserId};
