/// Configuration management for the API server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `API_HOST`: Host to bind to (default: 0.0.0.0)
/// - `API_PORT`: Port to bind to (default: 8080)
/// - `API_PRODUCTION`: Set to "true" to mark session cookies `Secure` (default: false)
/// - `SESSION_SECRET`: Secret key for session token signing (required, >= 32 bytes)
/// - `HASHER_MEMORY_KIB`: Argon2id memory cost in KiB (default: 65536)
/// - `HASHER_ITERATIONS`: Argon2id iteration count (default: 3)
/// - `HASHER_PARALLELISM`: Argon2id parallelism (default: 4)
/// - `RUST_LOG`: Log level (default: info)
///
/// # Example
///
/// ```no_run
/// use pinkdash_api::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use pinkdash_shared::auth::password::HasherParams;
use std::env;

/// Complete application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Session token configuration
    pub session: SessionConfig,

    /// Credential hashing work factor
    pub hasher: HasherParams,
}

/// API server configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,

    /// Whether the server runs behind TLS in production
    ///
    /// Controls the `Secure` attribute on session cookies.
    pub production: bool,
}

/// Session token configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// Secret key for signing session tokens
    ///
    /// IMPORTANT: This must be kept secret and should be at least 32 bytes.
    /// Generate with: `openssl rand -hex 32`
    pub secret: String,
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The secret must never end up in logs, even via Debug.
        f.debug_struct("SessionConfig")
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `SESSION_SECRET` is missing or shorter than 32 bytes
    /// - Numeric environment variables have invalid values
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse::<u16>()?;
        let production = env::var("API_PRODUCTION")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let session_secret = env::var("SESSION_SECRET")
            .map_err(|_| anyhow::anyhow!("SESSION_SECRET environment variable is required"))?;

        if session_secret.len() < 32 {
            anyhow::bail!("SESSION_SECRET must be at least 32 characters long");
        }

        let defaults = HasherParams::default();
        let hasher = HasherParams {
            memory_kib: env::var("HASHER_MEMORY_KIB")
                .unwrap_or_else(|_| defaults.memory_kib.to_string())
                .parse::<u32>()?,
            iterations: env::var("HASHER_ITERATIONS")
                .unwrap_or_else(|_| defaults.iterations.to_string())
                .parse::<u32>()?,
            parallelism: env::var("HASHER_PARALLELISM")
                .unwrap_or_else(|_| defaults.parallelism.to_string())
                .parse::<u32>()?,
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
                production,
            },
            session: SessionConfig {
                secret: session_secret,
            },
            hasher,
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}
