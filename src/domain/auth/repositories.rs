//! Repository traits for the authentication domain

use async_trait::async_trait;

use super::entities::User;
use super::errors::AuthError;
use super::value_objects::Email;

/// User credential store.
///
/// Only the in-memory implementation exists; the trait keeps handlers and
/// use cases testable with fakes.
#[async_trait]
pub trait IUserRepository: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError>;
    async fn save(&self, user: User) -> Result<(), AuthError>;
}
