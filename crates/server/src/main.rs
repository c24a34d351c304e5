// crates/server/src/main.rs
//! InboxHQ server binary.
//!
//! Opens the SQLite database, runs migrations, and serves the REST API
//! (plus the built SPA when a static dir is configured).

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use inboxhq_db::Database;
use inboxhq_server::{create_app_with_static, AppState};
use tracing_subscriber::EnvFilter;

/// Default port for the server.
const DEFAULT_PORT: u16 = 47311;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("INBOXHQ_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Get the static directory for serving frontend files.
///
/// Priority:
/// 1. STATIC_DIR environment variable (explicit override)
/// 2. ./dist directory (if it exists)
/// 3. None (API-only mode)
fn get_static_dir() -> Option<PathBuf> {
    std::env::var("STATIC_DIR")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            let dist = PathBuf::from("dist");
            dist.exists().then_some(dist)
        })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("inboxhq=info,tower_http=warn")),
        )
        .compact()
        .init();

    eprintln!("\n\u{1f4e5} inboxhq v{}\n", env!("CARGO_PKG_VERSION"));

    let db = match std::env::var("INBOXHQ_DB") {
        Ok(path) => Database::new(&PathBuf::from(path)).await?,
        Err(_) => Database::open_default().await?,
    };
    tracing::info!(path = %db.path().display(), "Database ready");

    let api_token = std::env::var("INBOXHQ_API_TOKEN").ok();
    if api_token.is_none() {
        tracing::warn!("INBOXHQ_API_TOKEN not set; ticket and actor routes are unguarded");
    }

    let state = AppState::new(db, api_token);
    let app = create_app_with_static(state, get_static_dir());

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("  \u{2192} http://localhost:{}\n", port);

    axum::serve(listener, app).await?;
    Ok(())
}
