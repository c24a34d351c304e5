// crates/server/src/routes/suggestions.rs
//! Autocomplete suggestion endpoint.
//!
//! - GET /suggestions?q=... - Ranked, typed suggestions for a draft query

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use inboxhq_types::SuggestResponse;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::AppState;
use crate::suggest::build_suggestions;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct SuggestQuery {
    /// The draft query string. Empty or missing yields an empty result;
    /// the client normally short-circuits before calling.
    pub q: Option<String>,
}

/// Build the suggestions sub-router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/suggestions", get(suggestions_handler))
}

/// GET /api/suggestions - Rank autocomplete suggestions for a query.
///
/// At most 5 entries, deduplicated case-insensitively, sorted by score with
/// recency breaking ties.
async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SuggestQuery>,
) -> ApiResult<Json<SuggestResponse>> {
    let q = query.q.as_deref().unwrap_or("").trim();
    let suggestions = build_suggestions(&state.db, q).await?;
    Ok(Json(SuggestResponse { suggestions }))
}
