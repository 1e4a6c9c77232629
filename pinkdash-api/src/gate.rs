/// Session gate middleware
///
/// Every protected route passes through this single middleware instead of
/// repeating the extract-verify-branch dance per handler:
///
/// 1. Extract the session token from the session cookie; absence rejects
///    with `Unauthorized`.
/// 2. Verify the token with the codec; any failure rejects with
///    `InvalidToken`.
/// 3. On success, insert the recovered [`Principal`] into the request
///    extensions and continue.
///
/// Both rejections are 401; they stay distinct internally (and in the
/// response error code) for observability, but neither reveals which
/// verification check failed. Handlers must take the authenticated subject
/// only from the injected `Principal`, never from the request body or any
/// other client-controlled source.
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get, Extension};
/// use pinkdash_api::gate::{session_gate, Principal};
/// # use pinkdash_api::app::AppState;
///
/// async fn protected(Extension(principal): Extension<Principal>) -> String {
///     format!("Hello, {}!", principal.subject)
/// }
///
/// # fn build(state: AppState) -> Router {
/// Router::new()
///     .route("/protected", get(protected))
///     .layer(axum::middleware::from_fn_with_state(state.clone(), session_gate))
///     .with_state(state)
/// # }
/// ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::{app::AppState, error::ApiError};
use pinkdash_shared::auth::cookie::extract_session_token;

/// Authenticated principal injected into request extensions
///
/// Carries the subject identifier recovered from a verified session token.
#[derive(Debug, Clone)]
pub struct Principal {
    /// Subject identifier (the user id the token was issued for)
    pub subject: String,
}

/// Session gate middleware
///
/// Terminal states per request: `Rejected` (no cookie, or verification
/// failed) or `Authorized` (principal injected). Verification is a pure,
/// immediate check; there are no retries.
pub async fn session_gate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_session_token(req.headers()).ok_or_else(|| {
        tracing::debug!(path = %req.uri().path(), "request rejected: no session cookie");
        ApiError::Unauthorized("Missing session cookie".to_string())
    })?;

    // Verification failures already collapse to a single Invalid outcome
    // inside the codec; the cause is logged there.
    let session = state.tokens.verify(&token)?;

    req.extensions_mut().insert(Principal {
        subject: session.subject,
    });

    Ok(next.run(req).await)
}
