// crates/server/src/routes/actors.rs
//! Actor directory endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use inboxhq_types::{Actor, ActorRole};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ActorListQuery {
    /// `customer` or `agent`; omit for everyone.
    pub role: Option<String>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actors", get(list_actors))
        .route("/actors/{id}", get(get_actor))
}

/// GET /api/actors - List actors, optionally filtered by role.
async fn list_actors(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActorListQuery>,
) -> ApiResult<Json<Vec<Actor>>> {
    let role = query
        .role
        .as_deref()
        .map(str::parse::<ActorRole>)
        .transpose()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let actors = state.db.list_actors(role).await?;
    Ok(Json(actors))
}

/// GET /api/actors/{id} - Fetch one actor.
async fn get_actor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Actor>> {
    let actor = state
        .db
        .get_actor(&id)
        .await?
        .ok_or_else(|| ApiError::ActorNotFound(id))?;
    Ok(Json(actor))
}
