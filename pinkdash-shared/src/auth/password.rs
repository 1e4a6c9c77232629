/// Credential hashing module using Argon2id
///
/// This module provides salted, irreversible password hashing using the
/// Argon2id algorithm. The work factor is deliberately high and tunable:
/// hashing takes multiple milliseconds on commodity hardware to resist
/// offline brute force, while verification stays well under a second.
///
/// # Security
///
/// - **Algorithm**: Argon2id (hybrid of Argon2i and Argon2d)
/// - **Memory**: 64 MB default (configurable)
/// - **Iterations**: 3 passes default (configurable)
/// - **Parallelism**: 4 lanes default (configurable)
/// - **Output**: 32-byte hash
/// - **Salt**: 16 bytes of OS randomness, fresh per digest
///
/// Digests are PHC strings; the salt and parameters used for hashing are
/// embedded in the digest, so verification never needs the hasher's own
/// configuration to match the one that produced the digest.
///
/// # Example
///
/// ```
/// use pinkdash_shared::auth::password::{Hasher, HasherParams};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hasher = Hasher::new(HasherParams::default())?;
///
/// let digest = hasher.hash("super_secret_password_123")?;
/// assert!(hasher.verify("super_secret_password_123", &digest));
/// assert!(!hasher.verify("wrong_password", &digest));
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, ParamsBuilder, Version,
};

/// Error type for credential hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Work-factor parameters were rejected by the algorithm
    #[error("Invalid hashing parameters: {0}")]
    InvalidParams(String),

    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),
}

/// Argon2id work-factor parameters
///
/// Supplied once at process start from configuration. The defaults match
/// current OWASP guidance for server-side password storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HasherParams {
    /// Memory cost in KiB
    pub memory_kib: u32,

    /// Number of iterations (passes over memory)
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u32,
}

impl Default for HasherParams {
    fn default() -> Self {
        Self {
            memory_kib: 65536, // 64 MB
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Credential hasher with an explicit, immutable work factor
///
/// Constructed once at startup and shared across handlers. Hashing is
/// CPU-bound; callers on an async runtime should treat `hash` and `verify`
/// as offloadable work (`tokio::task::spawn_blocking`).
#[derive(Clone)]
pub struct Hasher {
    argon2: Argon2<'static>,
}

impl Hasher {
    /// Creates a hasher with the given work factor
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::InvalidParams` if the parameters are outside
    /// the ranges the algorithm accepts (e.g. parallelism of zero).
    pub fn new(params: HasherParams) -> Result<Self, PasswordError> {
        let params = ParamsBuilder::new()
            .m_cost(params.memory_kib)
            .t_cost(params.iterations)
            .p_cost(params.parallelism)
            .output_len(32)
            .build()
            .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        Ok(Self {
            argon2: Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hashes a password with a fresh random salt
    ///
    /// Two calls with the same password yield different digests because the
    /// salt is regenerated from the OS RNG on every call.
    ///
    /// # Returns
    ///
    /// PHC string format digest (includes algorithm, parameters, salt, and hash):
    ///
    /// ```text
    /// $argon2id$v=19$m=65536,t=3,p=4$c2FsdHNhbHRzYWx0$hash...
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `PasswordError::HashError` only on catastrophic internal
    /// failure; this is not a normal path.
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let digest = self
            .argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashError(e.to_string()))?;

        Ok(digest.to_string())
    }

    /// Verifies a password against a stored digest
    ///
    /// Recomputes the hash using the salt and parameters embedded in the
    /// digest and compares in constant time, so verification time is
    /// independent of where a mismatch occurs.
    ///
    /// Returns `false` for a mismatch, a malformed digest, or any internal
    /// error; a wrong password is never an error. Malformed digests are
    /// logged since they indicate corrupted stored credentials rather than
    /// a bad login attempt.
    pub fn verify(&self, password: &str, digest: &str) -> bool {
        let parsed = match PasswordHash::new(digest) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "stored credential digest is malformed");
                return false;
            }
        };

        // Parameters come from the digest itself, not from self.argon2.
        match Argon2::default().verify_password(password.as_bytes(), &parsed) {
            Ok(()) => true,
            Err(argon2::password_hash::Error::Password) => false,
            Err(e) => {
                tracing::warn!(error = %e, "credential verification failed internally");
                false
            }
        }
    }
}

impl std::fmt::Debug for Hasher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hasher").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_hasher() -> Hasher {
        // Cheap parameters keep the test suite fast; production defaults are
        // exercised by test_default_params_digest_format.
        Hasher::new(HasherParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .expect("params should be valid")
    }

    #[test]
    fn test_hash_produces_phc_digest() {
        let hasher = test_hasher();
        let digest = hasher.hash("test_password_123").expect("Hash should succeed");

        assert!(digest.starts_with("$argon2id$"));
        assert!(digest.contains("v=19"));
        assert!(digest.contains("m=1024"));
        assert!(digest.contains("t=1"));
        assert!(digest.contains("p=1"));
    }

    #[test]
    fn test_default_params_digest_format() {
        let hasher = Hasher::new(HasherParams::default()).expect("defaults should be valid");
        let digest = hasher.hash("test_password_123").expect("Hash should succeed");

        assert!(digest.contains("m=65536"));
        assert!(digest.contains("t=3"));
        assert!(digest.contains("p=4"));
    }

    #[test]
    fn test_hash_produces_different_salts() {
        let hasher = test_hasher();

        let digest1 = hasher.hash("same_password").expect("Hash 1 should succeed");
        let digest2 = hasher.hash("same_password").expect("Hash 2 should succeed");

        // Different salts = different digests
        assert_ne!(digest1, digest2);
    }

    #[test]
    fn test_verify_correct_password() {
        let hasher = test_hasher();
        let digest = hasher.hash("correct_password").expect("Hash should succeed");

        assert!(hasher.verify("correct_password", &digest));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hasher = test_hasher();
        let digest = hasher.hash("correct_password").expect("Hash should succeed");

        assert!(!hasher.verify("wrong_password", &digest));
    }

    #[test]
    fn test_verify_empty_password() {
        let hasher = test_hasher();
        let digest = hasher.hash("password").expect("Hash should succeed");

        assert!(!hasher.verify("", &digest));
    }

    #[test]
    fn test_verify_malformed_digest_is_false_not_error() {
        let hasher = test_hasher();

        assert!(!hasher.verify("password", "not_a_digest"));
        assert!(!hasher.verify("password", "$argon2id$garbage"));
        assert!(!hasher.verify("password", ""));
    }

    #[test]
    fn test_verify_digest_from_different_work_factor() {
        // A digest hashed under one work factor must still verify under a
        // hasher configured with another, since parameters travel in the
        // digest itself.
        let cheap = test_hasher();
        let expensive = Hasher::new(HasherParams {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .expect("params should be valid");

        let digest = cheap.hash("portable_password").expect("Hash should succeed");
        assert!(expensive.verify("portable_password", &digest));
    }

    #[test]
    fn test_hash_verify_roundtrip() {
        let hasher = test_hasher();
        let passwords = vec![
            "simple",
            "with spaces",
            "with-special-chars!@#$%",
            "unicode-密码-パスワード",
            "very_long_password_that_is_longer_than_usual_passwords_123456789",
        ];

        for password in passwords {
            let digest = hasher.hash(password).expect("Hash should succeed");
            assert!(hasher.verify(password, &digest), "Password '{}' should verify", password);
        }
    }

    #[test]
    fn test_invalid_params_rejected() {
        let result = Hasher::new(HasherParams {
            memory_kib: 0,
            iterations: 0,
            parallelism: 0,
        });
        assert!(result.is_err());
    }
}
