/// Authentication endpoints
///
/// This module provides the route handlers that consume the auth core:
///
/// - `POST /v1/auth/register` - Register new user (hashes the credential)
/// - `POST /v1/auth/login` - Verify credentials, issue session cookie
/// - `POST /v1/auth/logout` - Clear session cookie (gated)
/// - `GET /v1/auth/me` - Current principal's account (gated)
///
/// Hashing and verification are CPU-bound by design (tunable Argon2id work
/// factor), so both are offloaded with `spawn_blocking` rather than run on
/// the async worker threads. Token operations are cheap and run inline.

use axum::{
    extract::{Extension, State},
    http::{header, StatusCode},
    response::AppendHeaders,
    Json,
};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult, ValidationErrorDetail},
    gate::Principal,
};
use pinkdash_shared::{
    auth::cookie::{clear_session_cookie, session_cookie, SESSION_MAX_AGE_SECS},
    store::CreateUser,
};

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional display name
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
}

/// Register response
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    /// User ID
    pub user_id: String,

    /// Email address
    pub email: String,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Login response
///
/// The session token itself travels only in the HTTP-only cookie, never in
/// the response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// User ID
    pub user_id: String,

    /// Email address
    pub email: String,
}

/// Current-user response
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// User ID
    pub user_id: String,

    /// Email address
    pub email: String,

    /// Optional display name
    pub name: Option<String>,
}

fn validation_errors(e: validator::ValidationErrors) -> ApiError {
    let errors: Vec<ValidationErrorDetail> = e
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| ValidationErrorDetail {
                field: field.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "Validation failed".to_string()),
            })
        })
        .collect();
    ApiError::ValidationError(errors)
}

/// Register a new user
///
/// Hashes the password with the configured work factor and persists the
/// account via the user-store collaborator. The plaintext never leaves this
/// handler and is never logged.
///
/// # Errors
///
/// - `409 Conflict`: Email already exists
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Hashing or store failure
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    req.validate().map_err(validation_errors)?;

    // Hashing is deliberately expensive; keep it off the async workers.
    let hasher = state.hasher.clone();
    let password = req.password;
    let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| ApiError::InternalError(format!("Hashing task failed: {}", e)))??;

    let user = state
        .users
        .create(CreateUser {
            email: req.email,
            password_hash,
            name: req.name,
        })
        .await?;

    tracing::info!(user_id = %user.id, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id.to_string(),
            email: user.email,
        }),
    ))
}

/// Login endpoint
///
/// Verifies the password against the stored digest, records the login
/// time, then issues a signed session token bound to the user id and
/// installs it in the session cookie. Unknown email and wrong password
/// produce the same generic response and perform the same hashing work,
/// so neither the body nor the timing is an account-probing oracle.
///
/// # Errors
///
/// - `401 Unauthorized`: Invalid credentials
/// - `422 Unprocessable Entity`: Validation failed
/// - `500 Internal Server Error`: Token issuance or store failure
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<(
    AppendHeaders<[(header::HeaderName, String); 1]>,
    Json<LoginResponse>,
)> {
    req.validate().map_err(validation_errors)?;

    let user = state.users.find_by_email(&req.email).await?;

    // Verify against the stored digest, or against the decoy digest when
    // the email is unknown: both miss paths cost one Argon2 verification,
    // so response timing does not reveal whether the account exists. The
    // real check must never be skipped or short-circuited to true.
    let hasher = state.hasher.clone();
    let password = req.password;
    let digest = match &user {
        Some(user) => user.password_hash.clone(),
        None => state.decoy_digest.to_string(),
    };
    let valid = tokio::task::spawn_blocking(move || hasher.verify(&password, &digest))
        .await
        .map_err(|e| ApiError::InternalError(format!("Verification task failed: {}", e)))?;

    let user = match user {
        Some(user) if valid => user,
        Some(user) => {
            tracing::debug!(user_id = %user.id, "login rejected: credential mismatch");
            return Err(ApiError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }
        None => {
            tracing::debug!("login rejected: unknown email");
            return Err(ApiError::Unauthorized(
                "Invalid email or password".to_string(),
            ));
        }
    };

    state.users.record_login(user.id).await?;

    // Token lifetime matches the cookie's Max-Age of one week.
    let token = state
        .tokens
        .issue(&user.id.to_string(), Duration::seconds(SESSION_MAX_AGE_SECS))?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(&token, state.secure_cookies()),
        )]),
        Json(LoginResponse {
            user_id: user.id.to_string(),
            email: user.email,
        }),
    ))
}

/// Logout endpoint (gated)
///
/// Sessions are stateless, so logout is purely client-side: the response
/// clears the session cookie. The token itself stays valid until expiry;
/// there is no server-side revocation list.
pub async fn logout(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> (
    AppendHeaders<[(header::HeaderName, String); 1]>,
    StatusCode,
) {
    tracing::info!(subject = %principal.subject, "user logged out");

    (
        AppendHeaders([(
            header::SET_COOKIE,
            clear_session_cookie(state.secure_cookies()),
        )]),
        StatusCode::NO_CONTENT,
    )
}

/// Current-user endpoint (gated)
///
/// Resolves the account for the gate-injected principal. The subject
/// identifier comes exclusively from the verified token; nothing in the
/// request body or query is trusted for identity.
///
/// # Errors
///
/// - `401 Unauthorized`: The session's user no longer exists (stale token)
pub async fn me(
    State(state): State<AppState>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<MeResponse>> {
    let user_id =
        Uuid::parse_str(&principal.subject).map_err(|_| ApiError::InvalidToken)?;

    let user = state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(ApiError::InvalidToken)?;

    Ok(Json(MeResponse {
        user_id: user.id.to_string(),
        email: user.email,
        name: user.name,
    }))
}
