//! HTTP surface for folderstat.
//!
//! Two services share the scanning core; a process exposes one of them,
//! chosen by [`ServiceMode`]:
//!
//! | mode | `GET /` | `POST /analyze` |
//! |---|---|---|
//! | `upload` | upload page | multipart `files` fields, JSON report |
//! | `path` | liveness JSON | `{"path": ...}` body, `?format=json\|csv&ext=...` |
//!
//! Walking and staging run on tokio's blocking pool so that one slow scan
//! does not stall other requests. Every request scans from scratch.

mod config;
mod error;
pub mod path;
pub mod upload;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tokio::net::TcpListener;

pub use config::{AppState, ServerConfig, ServiceMode};
pub use error::ApiError;

/// Build the router for the configured service.
pub fn router(config: ServerConfig) -> Router {
    let body_limit = config.max_upload_bytes;
    let mode = config.mode;
    let state = Arc::new(AppState::new(config));

    let routes = match mode {
        ServiceMode::Upload => Router::new()
            .route("/", get(upload::index))
            .route("/analyze", post(upload::analyze)),
        ServiceMode::Path => Router::new()
            .route("/", get(path::index))
            .route("/analyze", post(path::analyze)),
    };

    routes
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Bind the configured address and serve until the process exits.
pub async fn serve(config: ServerConfig) -> std::io::Result<()> {
    let listener = TcpListener::bind(config.bind).await?;
    tracing::info!(
        addr = %listener.local_addr()?,
        mode = %config.mode,
        "folderstat listening"
    );
    axum::serve(listener, router(config)).await
}
