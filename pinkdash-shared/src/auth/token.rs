/// Session token issuance and verification
///
/// This module provides the stateless session token codec used for dashboard
/// authentication. Tokens are compact, signed, self-contained JWTs (HS256)
/// binding a subject identifier to an expiry instant; nothing is stored
/// server-side and there is no revocation list.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Secret Management**: the signing secret is owned exclusively by the
///   codec, pre-derived into keys at construction, and never logged
/// - **Validation**: a token is valid iff its signature verifies and its
///   expiry is strictly in the future at verification time
/// - **No Oracle**: malformed, forged, wrong-issuer, and expired tokens all
///   collapse to the single [`TokenError::Invalid`] outcome; the distinct
///   cause is only recorded in internal logs
///
/// # Example
///
/// ```
/// use pinkdash_shared::auth::token::TokenCodec;
/// use chrono::Duration;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let codec = TokenCodec::new("signing-secret-at-least-32-bytes-long");
///
/// let token = codec.issue("user_123", Duration::days(7))?;
/// let session = codec.verify(&token)?;
/// assert_eq!(session.subject, "user_123");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Issuer claim stamped into every token
const ISSUER: &str = "pinkdash";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Failed to create token (catastrophic, not a normal path)
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Token failed verification for any reason
    ///
    /// Deliberately carries no detail: callers must not be able to
    /// distinguish "expired" from "forged" from "malformed".
    #[error("Invalid session token")]
    Invalid,
}

/// Signed token payload
///
/// # Claims
///
/// - `sub`: Subject identifier (opaque string, e.g. a user id)
/// - `iss`: Issuer (always "pinkdash")
/// - `iat`: Issued at (Unix timestamp)
/// - `exp`: Expiration time (Unix timestamp)
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iss: String,
    iat: i64,
    exp: i64,
}

/// A verified session, recovered from a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Authenticated subject identifier
    pub subject: String,
}

/// Stateless session token codec
///
/// Owns the process-wide signing secret. Constructed once at startup from
/// configuration and shared read-only; all operations are pure functions of
/// their inputs plus the immutable keys, so unsynchronized concurrent use is
/// safe.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    /// Creates a codec from the signing secret
    ///
    /// The secret should be at least 32 bytes of randomness (e.g. from
    /// `openssl rand -hex 32`); length enforcement lives in the server's
    /// configuration loader. The raw secret is not retained.
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);
        // Expiry is checked by verify() itself against a single clock read,
        // taken once per call so the integrity and expiry checks cannot race.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["iss"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Issues a signed session token for a subject
    ///
    /// The token encodes `{sub, iss, iat, exp}` with `exp = now + ttl`; the
    /// signature covers the entire payload, so any mutation of the payload
    /// bytes invalidates it.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::CreateError` if encoding fails; this indicates
    /// a broken signing setup, not bad input.
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::CreateError(e.to_string()))
    }

    /// Verifies a token and recovers the session
    ///
    /// Checks, in order: structural validity, signature integrity against
    /// the process signing secret, issuer, and `now < exp` (strict). Any
    /// failure yields the undifferentiated [`TokenError::Invalid`]; the
    /// distinct cause is logged at debug level for operational diagnosis.
    pub fn verify(&self, token: &str) -> Result<Session, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            tracing::debug!(cause = %e, "session token rejected");
            TokenError::Invalid
        })?;

        // Single clock read per call.
        let now = Utc::now().timestamp();
        if now >= data.claims.exp {
            tracing::debug!(
                expired_at = data.claims.exp,
                "session token rejected: expired"
            );
            return Err(TokenError::Invalid);
        }

        Ok(Session {
            subject: data.claims.sub,
        })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Keys are secret material and must never appear in logs.
        f.debug_struct("TokenCodec").finish_non_exhaustive()
    }
}
