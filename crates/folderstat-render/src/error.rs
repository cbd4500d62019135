//! Rendering errors.

use thiserror::Error;

/// Errors that can occur while serializing a result.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error while rendering: {0}")]
    Io(#[from] std::io::Error),

    #[error("Rendered output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
