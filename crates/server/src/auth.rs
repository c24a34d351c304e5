// crates/server/src/auth.rs
//! Bearer-token guard for the ticket and actor routes.
//!
//! Session management itself is an external concern; this layer only
//! enforces the boundary contract: a missing or mismatched credential
//! yields a typed 401 the SPA surfaces as a toast/redirect. No retries, no
//! masking. Suggestions and health stay unguarded since autocomplete
//! degrades silently by contract.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;

/// Require `Authorization: Bearer <token>` when a token is configured.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(expected) = state.api_token.as_deref() else {
        // No token configured, guard disabled.
        return Ok(next.run(request).await);
    };

    let header = request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match header.and_then(|h| h.strip_prefix("Bearer ")) {
        Some(token) if token == expected => Ok(next.run(request).await),
        Some(_) => Err(ApiError::Unauthorized("invalid bearer token".to_string())),
        None => Err(ApiError::Unauthorized("missing bearer token".to_string())),
    }
}
