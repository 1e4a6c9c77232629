/// User record and creation payload
///
/// Users are stored with an Argon2id digest, never a plaintext password.
/// The user's id doubles as the session token subject identifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User account record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user ID (UUID v4); used as the token subject
    pub id: Uuid,

    /// Email address, unique across all users
    pub email: String,

    /// Argon2id credential digest (PHC string)
    ///
    /// Never store plaintext passwords.
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,

    /// When the account was created
    pub created_at: DateTime<Utc>,

    /// When the user last logged in (None if never)
    pub last_login_at: Option<DateTime<Utc>>,
}

/// Payload for creating a user
#[derive(Debug, Clone)]
pub struct CreateUser {
    /// Email address
    pub email: String,

    /// Argon2id credential digest (already hashed by the caller)
    pub password_hash: String,

    /// Optional display name
    pub name: Option<String>,
}
