//! API route handlers for the InboxHQ server.

pub mod actors;
pub mod health;
pub mod suggestions;
pub mod tickets;

use std::sync::Arc;

use axum::{middleware, Router};

use crate::auth::require_bearer;
use crate::state::AppState;

/// Create the combined API router with all routes under the /api prefix.
///
/// Routes:
/// - GET /api/health - Health check
/// - GET /api/suggestions - Ranked autocomplete suggestions
/// - GET /api/tickets - List tickets with query/facet filters
/// - POST /api/tickets - Create a ticket
/// - GET /api/tickets/{id} - Get a ticket
/// - PATCH /api/tickets/{id} - Update status/assignee
/// - GET /api/tickets/{id}/comments - List a ticket's replies
/// - POST /api/tickets/{id}/comments - Add a reply
/// - GET /api/actors - List actors, optionally by role
///
/// Ticket and actor routes sit behind the bearer guard; health and
/// suggestions stay open.
pub fn api_routes(state: Arc<AppState>) -> Router {
    let guarded = Router::new()
        .merge(tickets::router())
        .merge(actors::router())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer,
        ));

    Router::new()
        .nest("/api", health::router())
        .nest("/api", suggestions::router())
        .nest("/api", guarded)
        .with_state(state)
}
