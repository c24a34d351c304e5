// crates/server/src/state.rs
//! Application state for the Axum server.

use std::sync::Arc;
use std::time::Instant;

use inboxhq_db::Database;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Database handle for ticket/actor/comment queries.
    pub db: Database,
    /// Expected bearer token for ticket/actor routes. `None` disables the
    /// guard (local development).
    pub api_token: Option<String>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database, api_token: Option<String>) -> Arc<Self> {
        Arc::new(Self {
            start_time: Instant::now(),
            db,
            api_token,
        })
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
