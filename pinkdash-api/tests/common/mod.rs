/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - In-memory application setup (no external collaborators)
/// - Pre-registered test user with a known password
/// - Request builder helpers for cookie-based sessions

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use pinkdash_api::app::{build_router, AppState};
use pinkdash_api::config::{ApiConfig, Config, SessionConfig};
use pinkdash_shared::auth::password::{Hasher, HasherParams};
use pinkdash_shared::store::{CreateUser, MemoryUserStore, User, UserStore};
use serde_json::json;
use tower::Service as _;

/// Password every pre-registered test user is created with
pub const TEST_PASSWORD: &str = "correct_horse_battery";

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub state: AppState,
    pub user: User,
}

/// Test configuration (cheap hashing so the suite stays fast)
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            production: false,
        },
        session: SessionConfig {
            secret: "integration-test-secret-at-least-32-bytes".to_string(),
        },
        hasher: HasherParams {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
    }
}

impl TestContext {
    /// Creates a new test context with a fresh in-memory store and one
    /// registered user
    pub async fn new() -> anyhow::Result<Self> {
        let config = test_config();

        let store = Arc::new(MemoryUserStore::new());

        // Seed a user directly through the store, hashing the way the
        // register handler does.
        let hasher = Hasher::new(config.hasher)?;
        let user = store
            .create(CreateUser {
                email: "test@example.com".to_string(),
                password_hash: hasher.hash(TEST_PASSWORD)?,
                name: Some("Test User".to_string()),
            })
            .await?;

        let state = AppState::new(store, config)?;
        let app = build_router(state.clone());

        Ok(TestContext { app, state, user })
    }

    /// Sends a request through the router
    pub async fn send(&mut self, request: Request<Body>) -> Response<Body> {
        self.app.call(request).await.expect("router should respond")
    }

    /// Logs the seeded user in and returns the session cookie value
    /// (`pinkdash_session=<token>`)
    pub async fn login_cookie(&mut self) -> String {
        let request = Request::builder()
            .method("POST")
            .uri("/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({
                    "email": self.user.email,
                    "password": TEST_PASSWORD,
                })
                .to_string(),
            ))
            .unwrap();

        let response = self.send(request).await;
        assert_eq!(response.status(), axum::http::StatusCode::OK);

        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .expect("login should set the session cookie")
            .to_str()
            .unwrap();

        // Keep only the name=value pair; attributes are not sent back.
        set_cookie
            .split(';')
            .next()
            .expect("cookie should have a value")
            .to_string()
    }
}

/// Reads a JSON response body
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
