// crates/server/src/lib.rs
//! InboxHQ server library.
//!
//! This crate provides the Axum-based HTTP server for the InboxHQ helpdesk.
//! It serves a REST API for tickets, actors, comments, and ranked
//! autocomplete suggestions.

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;
pub mod suggest;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes (health, suggestions, tickets, actors)
/// - CORS for development (allows any origin)
/// - Request tracing
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Like [`create_app`], but also serves the built SPA from `static_dir`
/// with an index.html fallback for client-side routing.
pub fn create_app_with_static(state: Arc<AppState>, static_dir: Option<PathBuf>) -> Router {
    let app = create_app(state);
    match static_dir {
        Some(dir) => {
            let index = dir.join("index.html");
            app.fallback_service(ServeDir::new(&dir).fallback(ServeFile::new(index)))
        }
        None => app,
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Method, Request, StatusCode},
    };
    use inboxhq_db::Database;
    use inboxhq_types::{ActorRole, Suggestion, Ticket, TicketStatus};
    use tower::ServiceExt;

    async fn test_app(api_token: Option<&str>) -> Router {
        let db = Database::new_in_memory().await.unwrap();
        create_app(AppState::new(db, api_token.map(String::from)))
    }

    /// Helper to make a GET request to the app.
    async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    /// Helper to send a JSON body with the given method.
    async fn send_json(
        app: Router,
        method: Method,
        uri: &str,
        json: serde_json::Value,
    ) -> (StatusCode, String) {
        let response = app
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body_str = String::from_utf8(body.to_vec()).unwrap();

        (status, body_str)
    }

    // ========================================================================
    // Health Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app(None).await;
        let (status, body) = get(app, "/api/health").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert!(json["version"].is_string());
        assert!(json["uptime_secs"].is_number());
        // A fresh in-memory database answers the storage probe with zero rows.
        assert_eq!(json["tickets"], 0);
    }

    // ========================================================================
    // Suggestion Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_suggestions_empty_query_returns_empty_list() {
        let app = test_app(None).await;
        let (status, body) = get(app, "/api/suggestions?q=").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["suggestions"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_suggestions_typo_tolerant_end_to_end() {
        let db = Database::new_in_memory().await.unwrap();
        let customer = db
            .create_actor("Sam Customer", "sam@example.com", ActorRole::Customer)
            .await
            .unwrap();
        db.create_ticket(&inboxhq_types::NewTicket {
            subject: "Export feature broken".to_string(),
            description: "Clicking export does nothing".to_string(),
            priority: inboxhq_types::TicketPriority::High,
            requester_id: customer.id.clone(),
        })
        .await
        .unwrap();

        let app = create_app(AppState::new(db, None));
        let (status, body) = get(app, "/api/suggestions?q=expor").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        let suggestions: Vec<Suggestion> =
            serde_json::from_value(json["suggestions"].clone()).unwrap();
        assert!(!suggestions.is_empty());
        assert_eq!(suggestions[0].value, "Export feature broken");
        // "expor" is a direct (case-insensitive) substring.
        assert_eq!(suggestions[0].match_start, 0);
        assert_eq!(suggestions[0].match_length, 5);
    }

    // ========================================================================
    // Ticket Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_ticket_create_fetch_update() {
        let db = Database::new_in_memory().await.unwrap();
        let customer = db
            .create_actor("Sam Customer", "sam@example.com", ActorRole::Customer)
            .await
            .unwrap();
        let app = create_app(AppState::new(db, None));

        let (status, body) = send_json(
            app.clone(),
            Method::POST,
            "/api/tickets",
            serde_json::json!({
                "subject": "Printer on fire",
                "description": "Smoke coming out of the tray",
                "priority": "urgent",
                "requesterId": customer.id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        let created: Ticket = serde_json::from_str(&body).unwrap();
        assert_eq!(created.status, TicketStatus::Open);

        let (status, body) = get(app.clone(), &format!("/api/tickets/{}", created.id)).await;
        assert_eq!(status, StatusCode::OK);
        let fetched: Ticket = serde_json::from_str(&body).unwrap();
        assert_eq!(fetched.subject, "Printer on fire");

        let (status, body) = send_json(
            app,
            Method::PATCH,
            &format!("/api/tickets/{}", created.id),
            serde_json::json!({ "status": "resolved" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "body: {body}");
        let updated: Ticket = serde_json::from_str(&body).unwrap();
        assert_eq!(updated.status, TicketStatus::Resolved);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn test_ticket_not_found_returns_404() {
        let app = test_app(None).await;
        let (status, body) = get(app, "/api/tickets/nonexistent").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert!(json.get("error").is_some());
    }

    #[tokio::test]
    async fn test_ticket_list_rejects_unknown_status_label() {
        let app = test_app(None).await;
        let (status, _) = get(app, "/api/tickets?status=bogus").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    // ========================================================================
    // Bearer Guard Tests
    // ========================================================================

    #[tokio::test]
    async fn test_bearer_guard_rejects_missing_token() {
        let app = test_app(Some("secret")).await;
        let (status, _) = get(app, "/api/tickets").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bearer_guard_accepts_valid_token() {
        let app = test_app(Some("secret")).await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/tickets")
                    .header(header::AUTHORIZATION, "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_suggestions_stay_open_when_guard_enabled() {
        let app = test_app(Some("secret")).await;
        let (status, _) = get(app, "/api/suggestions?q=login").await;
        assert_eq!(status, StatusCode::OK);
    }

    // ========================================================================
    // Client Round-Trip Test
    // ========================================================================

    /// Spin up a real listener and drive the HTTP suggestion client against
    /// it, the way the SPA's autocomplete controller does.
    #[tokio::test]
    async fn test_http_suggest_client_against_live_server() {
        use inboxhq_client::{HttpSuggestClient, SuggestionSource};

        let db = Database::new_in_memory().await.unwrap();
        let customer = db
            .create_actor("Sam Customer", "sam@example.com", ActorRole::Customer)
            .await
            .unwrap();
        db.create_ticket(&inboxhq_types::NewTicket {
            subject: "Login issue".to_string(),
            description: "Cannot sign in".to_string(),
            priority: inboxhq_types::TicketPriority::Medium,
            requester_id: customer.id,
        })
        .await
        .unwrap();

        let app = create_app(AppState::new(db, None));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = HttpSuggestClient::new(format!("http://{addr}"));
        let suggestions = client.suggest("login").await.unwrap();
        assert_eq!(suggestions[0].value, "Login issue");
    }
}
