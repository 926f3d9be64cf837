//! In-memory user repository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::auth::{
    entities::User,
    errors::AuthError,
    repositories::IUserRepository,
    value_objects::Email,
};

/// User store keyed by email. State lives for the process lifetime only;
/// the demo has no durable credential store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Email, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IUserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, AuthError> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(email).cloned())
    }

    async fn save(&self, user: User) -> Result<(), AuthError> {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.email.clone(), user);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::value_objects::PasswordHash;

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryUserRepository::new();
        let email = Email::new("ops@example.com".to_string()).unwrap();
        let user = User::new(
            "ops".to_string(),
            email.clone(),
            PasswordHash::from("$argon2id$stub".to_string()),
        );

        repo.save(user.clone()).await.unwrap();

        let found = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.user_id, user.user_id);
        assert_eq!(found.username, "ops");
    }

    #[tokio::test]
    async fn missing_email_yields_none() {
        let repo = InMemoryUserRepository::new();
        let email = Email::new("ghost@example.com".to_string()).unwrap();
        assert!(repo.find_by_email(&email).await.unwrap().is_none());
    }
}
