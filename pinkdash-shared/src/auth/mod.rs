/// Authentication primitives for PinkDash
///
/// This module provides the stateless authentication core used to gate
/// every protected dashboard API route:
///
/// # Modules
///
/// - [`password`]: Argon2id credential hashing with a tunable work factor
/// - [`token`]: Signed session token issuance and verification
/// - [`cookie`]: The session cookie wire contract
///
/// # Security Features
///
/// - **Credential Hashing**: Argon2id, fresh random salt per digest
/// - **Session Tokens**: HS256-signed, self-contained, expiry-bound
/// - **Constant-time Comparison**: All verification uses constant-time operations
/// - **No Oracle**: Every token verification failure collapses to a single
///   `Invalid` outcome; the distinct cause is only logged internally
///
/// # Example
///
/// ```no_run
/// use pinkdash_shared::auth::password::{Hasher, HasherParams};
/// use pinkdash_shared::auth::token::TokenCodec;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // Credential hashing
/// let hasher = Hasher::new(HasherParams::default())?;
/// let digest = hasher.hash("user_password")?;
/// assert!(hasher.verify("user_password", &digest));
///
/// // Session tokens
/// let codec = TokenCodec::new("signing-secret-at-least-32-bytes-long");
/// let token = codec.issue("user_123", Duration::days(7))?;
/// assert_eq!(codec.verify(&token)?.subject, "user_123");
/// # Ok(())
/// # }
/// ```

pub mod cookie;
pub mod password;
pub mod token;
