// crates/server/src/routes/tickets.rs
//! Ticket CRUD and comment endpoints.
//!
//! - GET /tickets?q=&field=&status=&priority=&assignee=&limit=&offset=
//! - POST /tickets
//! - GET /tickets/{id}
//! - PATCH /tickets/{id}
//! - GET /tickets/{id}/comments
//! - POST /tickets/{id}/comments

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use inboxhq_db::TicketListFilter;
use inboxhq_types::{
    Comment, NewComment, NewTicket, SearchField, Ticket, TicketPriority, TicketStatus,
    TicketUpdate,
};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct TicketListQuery {
    pub q: Option<String>,
    /// `all` (default), `title`, or `description`.
    pub field: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    /// Assignee display name.
    pub assignee: Option<String>,
    /// Maximum rows to return (default 50, capped at 200).
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl TicketListQuery {
    fn into_filter(self) -> Result<TicketListFilter, ApiError> {
        let field = match self.field.as_deref() {
            None => SearchField::All,
            Some(raw) => raw
                .parse::<SearchField>()
                .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        };
        let status = self
            .status
            .as_deref()
            .map(str::parse::<TicketStatus>)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<TicketPriority>)
            .transpose()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;

        Ok(TicketListFilter {
            query: self.q,
            field,
            status,
            priority,
            assignee: self.assignee,
            limit: self.limit.unwrap_or(50).min(200),
            offset: self.offset.unwrap_or(0),
        })
    }
}

/// Build the tickets sub-router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tickets", get(list_tickets).post(create_ticket))
        .route("/tickets/{id}", get(get_ticket).patch(update_ticket))
        .route(
            "/tickets/{id}/comments",
            get(list_comments).post(create_comment),
        )
}

/// GET /api/tickets - List tickets with text-query and facet filters.
async fn list_tickets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TicketListQuery>,
) -> ApiResult<Json<Vec<Ticket>>> {
    let filter = query.into_filter()?;
    let tickets = state.db.list_tickets(&filter).await?;
    Ok(Json(tickets))
}

/// POST /api/tickets - Create a ticket.
async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(new): Json<NewTicket>,
) -> ApiResult<Json<Ticket>> {
    if new.subject.trim().is_empty() {
        return Err(ApiError::BadRequest("subject must not be empty".to_string()));
    }
    let ticket = state.db.create_ticket(&new).await?;
    Ok(Json(ticket))
}

/// GET /api/tickets/{id} - Fetch one ticket.
async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .db
        .get_ticket(&id)
        .await?
        .ok_or_else(|| ApiError::TicketNotFound(id))?;
    Ok(Json(ticket))
}

/// PATCH /api/tickets/{id} - Update status and/or assignee.
async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(update): Json<TicketUpdate>,
) -> ApiResult<Json<Ticket>> {
    let ticket = state
        .db
        .update_ticket(&id, &update)
        .await?
        .ok_or_else(|| ApiError::TicketNotFound(id))?;
    Ok(Json(ticket))
}

/// GET /api/tickets/{id}/comments - List a ticket's replies in thread order.
async fn list_comments(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Comment>>> {
    if state.db.get_ticket(&id).await?.is_none() {
        return Err(ApiError::TicketNotFound(id));
    }
    let comments = state.db.list_comments(&id).await?;
    Ok(Json(comments))
}

/// POST /api/tickets/{id}/comments - Reply to a ticket.
async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(new): Json<NewComment>,
) -> ApiResult<Json<Comment>> {
    if new.body.trim().is_empty() {
        return Err(ApiError::BadRequest("body must not be empty".to_string()));
    }
    let comment = state
        .db
        .create_comment(&id, &new)
        .await?
        .ok_or_else(|| ApiError::TicketNotFound(id))?;
    Ok(Json(comment))
}
