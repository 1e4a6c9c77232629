/// In-memory user store
///
/// Keeps user records in a `RwLock`-guarded map. Used by the integration
/// tests and for local development runs; production deployments plug a
/// database-backed implementation in behind the same [`UserStore`] trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CreateUser, StoreError, User, UserStore};

/// `UserStore` backed by process memory
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: CreateUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        // Email uniqueness, case-insensitive like the production schema.
        let email_lower = user.email.to_lowercase();
        if users.values().any(|u| u.email.to_lowercase() == email_lower) {
            return Err(StoreError::DuplicateEmail);
        }

        let user = User {
            id: Uuid::new_v4(),
            email: user.email,
            password_hash: user.password_hash,
            name: user.name,
            created_at: Utc::now(),
            last_login_at: None,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        let email_lower = email.to_lowercase();
        Ok(users
            .values()
            .find(|u| u.email.to_lowercase() == email_lower)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn record_login(&self, id: Uuid) -> Result<(), StoreError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) => {
                user.last_login_at = Some(Utc::now());
                Ok(())
            }
            None => Err(StoreError::Internal(format!("No such user: {}", id))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request(email: &str) -> CreateUser {
        CreateUser {
            email: email.to_string(),
            password_hash: "$argon2id$fake".to_string(),
            name: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryUserStore::new();

        let created = store
            .create(create_request("user@example.com"))
            .await
            .expect("Should create");

        let by_email = store
            .find_by_email("user@example.com")
            .await
            .expect("Should query")
            .expect("Should exist");
        assert_eq!(by_email.id, created.id);

        let by_id = store
            .find_by_id(created.id)
            .await
            .expect("Should query")
            .expect("Should exist");
        assert_eq!(by_id.email, "user@example.com");
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = MemoryUserStore::new();

        store
            .create(create_request("user@example.com"))
            .await
            .expect("Should create");

        let result = store.create(create_request("USER@example.com")).await;
        assert!(matches!(result, Err(StoreError::DuplicateEmail)));
    }

    #[tokio::test]
    async fn test_record_login_sets_timestamp() {
        let store = MemoryUserStore::new();

        let created = store
            .create(create_request("user@example.com"))
            .await
            .expect("Should create");
        assert!(created.last_login_at.is_none());

        store.record_login(created.id).await.expect("Should record");

        let updated = store
            .find_by_id(created.id)
            .await
            .expect("Should query")
            .expect("Should exist");
        assert!(updated.last_login_at.is_some());
    }

    #[tokio::test]
    async fn test_record_login_unknown_user_errors() {
        let store = MemoryUserStore::new();

        let result = store.record_login(Uuid::new_v4()).await;
        assert!(matches!(result, Err(StoreError::Internal(_))));
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let store = MemoryUserStore::new();

        assert!(store
            .find_by_email("nobody@example.com")
            .await
            .expect("Should query")
            .is_none());
        assert!(store
            .find_by_id(Uuid::new_v4())
            .await
            .expect("Should query")
            .is_none());
    }
}
