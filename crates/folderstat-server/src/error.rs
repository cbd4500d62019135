//! Request errors and their HTTP mapping.

use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinError;

use folderstat_core::ScanError;
use folderstat_render::RenderError;

/// Errors a handler can return. Client mistakes map to 4xx, internal
/// faults to 5xx; both carry a `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("Malformed upload: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Malformed request body: {0}")]
    Body(#[from] serde_json::Error),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),

    #[error("No files were uploaded")]
    NoFiles,

    #[error("Background task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Scan(err) if err.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Multipart(err) => err.status(),
            Self::Body(_) | Self::UnknownFormat(_) | Self::NoFiles => StatusCode::BAD_REQUEST,
            Self::Scan(_) | Self::Render(_) | Self::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
