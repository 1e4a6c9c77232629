//! # PinkDash API Server
//!
//! Backend for the PinkDash administrative dashboard. Provides the
//! authentication endpoints and the session-gated API surface that fronts
//! the PinkSync transformation service.
//!
//! ## Architecture
//!
//! The server is built with Axum and provides:
//! - Credential hashing (Argon2id, tunable work factor)
//! - Stateless session tokens in an HTTP-only cookie
//! - A single session-gate middleware for every protected route
//!
//! ## Usage
//!
//! ```bash
//! SESSION_SECRET=$(openssl rand -hex 32) cargo run -p pinkdash-api
//! ```

use std::sync::Arc;

use pinkdash_api::{
    app::{build_router, AppState},
    config::Config,
};
use pinkdash_shared::store::MemoryUserStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pinkdash_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "PinkDash API Server v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;
    let bind_address = config.bind_address();

    // The in-memory store is the development collaborator; deployments swap
    // in the managed-database implementation behind the same trait.
    let state = AppState::new(Arc::new(MemoryUserStore::new()), config)?;
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
