//! Auth Middleware
//!
//! Bearer-token guard for protected routes. On success the verified
//! [`CallerIdentity`] is stored in the request extensions, where handlers
//! pick it up as an extractor argument.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::{CallerIdentity, TokenVerifier};
use crate::error::{AuthError, AuthResult};

/// Middleware state
#[derive(Clone)]
pub struct AuthLayerState {
    pub verifier: TokenVerifier,
}

impl AuthLayerState {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self {
            verifier: TokenVerifier::new(config),
        }
    }
}

/// Value of `Authorization: Bearer <token>`.
///
/// Absent header, non-UTF-8 value, another scheme, or an empty token are
/// all `MissingToken`.
pub fn bearer_token(headers: &HeaderMap) -> AuthResult<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// Extract and verify the caller's token against `now`.
pub fn authenticate(
    headers: &HeaderMap,
    verifier: &TokenVerifier,
    now: DateTime<Utc>,
) -> AuthResult<CallerIdentity> {
    let token = bearer_token(headers)?;
    verifier.verify_at(token, now)
}

/// Middleware that requires a valid bearer token
pub async fn require_auth(
    State(state): State<AuthLayerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = authenticate(req.headers(), &state.verifier, Utc::now())?;

    tracing::debug!(user_id = %identity.user_id, "Authenticated request");
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for CallerIdentity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Only present when `require_auth` ran for this route
        parts
            .extensions
            .get::<CallerIdentity>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
