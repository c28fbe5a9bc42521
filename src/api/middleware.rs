//! API Middleware
//!
//! Access gates: API keys for moderation, session tokens for key issuance.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use super::handlers::AppState;
use crate::auth::{read_cookie, verify_session_token};
use crate::error::{GuardianError, Result};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Rejects moderation requests without a valid `X-API-Key` header.
///
/// Passes everything through when `require_api_key` is off.
pub async fn require_api_key(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response> {
    if !state.config.require_api_key {
        return Ok(next.run(request).await);
    }

    let key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());
    let valid = state.keys.write().await.validate(key);

    if !valid {
        warn!(path = %request.uri().path(), "Rejected request with missing or invalid API key");
        return Err(GuardianError::Unauthorized(
            "Invalid or missing API key.".to_string(),
        ));
    }
    Ok(next.run(request).await)
}

/// Requires a valid session cookie before key issuance.
///
/// Without a configured session secret, key issuance is open.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let Some(secret) = state.config.session_secret.as_deref() else {
        return Ok(next.run(request).await);
    };

    // HTTP/2 clients may split cookies across several headers
    let user = request
        .headers()
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookies| read_cookie(cookies, &state.config.session_cookie))
        .and_then(|token| verify_session_token(secret, token))
        .ok_or_else(|| GuardianError::Unauthorized("Authentication required.".to_string()))?;

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}
