/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use pinkdash_api::{app::AppState, config::Config};
/// use pinkdash_shared::store::MemoryUserStore;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let state = AppState::new(Arc::new(MemoryUserStore::new()), config)?;
/// let app = pinkdash_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::{
    config::{ApiConfig, Config},
    gate::session_gate,
};
use pinkdash_shared::{
    auth::{password::Hasher, token::TokenCodec},
    store::UserStore,
};

/// Shared application state
///
/// This is cloned for each request handler via Axum's `State` extractor.
/// Uses Arc internally for cheap cloning. The token codec exclusively owns
/// the signing secret: the raw secret is consumed at construction and is
/// not reachable from the state afterwards.
#[derive(Clone)]
pub struct AppState {
    /// User store collaborator
    pub users: Arc<dyn UserStore>,

    /// Credential hasher (work factor fixed at startup)
    pub hasher: Arc<Hasher>,

    /// Session token codec (owns the signing secret)
    pub tokens: Arc<TokenCodec>,

    /// API server configuration
    pub api: Arc<ApiConfig>,

    /// Digest with no matching credential
    ///
    /// Login verifies unknown-email attempts against this so a lookup miss
    /// costs the same Argon2 work as a credential mismatch, keeping response
    /// timing from distinguishing the two.
    pub decoy_digest: Arc<String>,
}

impl AppState {
    /// Creates new application state
    ///
    /// Constructs the hasher and token codec from configuration once; both
    /// are immutable for the process lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured hashing work factor is invalid or
    /// the decoy digest cannot be produced.
    pub fn new(users: Arc<dyn UserStore>, config: Config) -> anyhow::Result<Self> {
        let hasher = Hasher::new(config.hasher)?;
        let tokens = TokenCodec::new(&config.session.secret);

        // Hash a throwaway random value; the plaintext is discarded, so no
        // password can ever verify against this digest.
        let decoy_digest = hasher.hash(&uuid::Uuid::new_v4().to_string())?;

        Ok(Self {
            users,
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
            api: Arc::new(config.api),
            decoy_digest: Arc::new(decoy_digest),
        })
    }

    /// Whether session cookies should carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.api.production
    }
}

/// Builds the complete Axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                   # Health check (public)
/// └── /v1/                      # API v1 (versioned)
///     └── /auth/
///         ├── POST /register    # Register new user (public)
///         ├── POST /login       # Login, sets session cookie (public)
///         ├── POST /logout      # Clear session cookie (gated)
///         └── GET  /me          # Current principal's account (gated)
/// ```
///
/// # Middleware Stack
///
/// Applied in order (bottom to top):
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Session gate (per-route-group basis)
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Health check (public, no auth)
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    // Auth routes (public, no session required)
    let auth_routes = Router::new()
        .route("/register", post(routes::auth::register))
        .route("/login", post(routes::auth::login));

    // Session routes (require a valid session cookie)
    let session_routes = Router::new()
        .route("/logout", post(routes::auth::logout))
        .route("/me", get(routes::auth::me))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            session_gate,
        ));

    let v1_routes = Router::new().nest("/auth", auth_routes.merge(session_routes));

    Router::new()
        .merge(health_routes)
        .nest("/v1", v1_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
