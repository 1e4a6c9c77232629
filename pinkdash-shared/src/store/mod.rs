/// User store collaborator boundary
///
/// The dashboard persists its users in a managed database that is outside
/// this repository's scope. This module defines the boundary the auth core
/// depends on: the [`UserStore`] trait, the [`User`] record it traffics in,
/// and an in-memory implementation used by the server in development and by
/// the integration tests.

pub mod memory;
pub mod user;

pub use memory::MemoryUserStore;
pub use user::{CreateUser, User};

use async_trait::async_trait;
use uuid::Uuid;

/// Error type for user store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Email address is already registered
    #[error("Email already exists")]
    DuplicateEmail,

    /// Backend failure (connection loss, constraint breakage, etc.)
    #[error("Store error: {0}")]
    Internal(String),
}

/// Persistence boundary for user accounts
///
/// Implementations own lookups and writes; they never see plaintext
/// passwords, only digests produced by the credential hasher.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user account
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateEmail` if the email is taken.
    async fn create(&self, user: CreateUser) -> Result<User, StoreError>;

    /// Finds a user by email address
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Finds a user by id
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Records a successful login for the user
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` if the user does not exist.
    async fn record_login(&self, id: Uuid) -> Result<(), StoreError>;
}
