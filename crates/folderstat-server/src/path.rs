//! Host-path scanning service.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use folderstat_core::{ExtensionFilter, ScanConfig, ScanError, ScanResult};
use folderstat_render::{CSV_FILENAME, OutputFormat, PathReport, csv_rows};
use folderstat_scan::ExtensionScanner;

use crate::config::AppState;
use crate::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct PathParams {
    /// `json` (default) or `csv`.
    pub format: Option<String>,
    /// Comma-separated extension allow-list.
    pub ext: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathRequest {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct Liveness {
    pub message: &'static str,
}

/// `GET /` - liveness message.
pub async fn index() -> Json<Liveness> {
    Json(Liveness {
        message: "folderstat path service is running",
    })
}

/// `POST /analyze` - scan a directory on the host.
///
/// The body is `{"path": ...}`; an empty body or a missing `path` falls
/// back to the configured default path.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PathParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let format = parse_format(params.format.as_deref())?;

    let request = if body.iter().all(u8::is_ascii_whitespace) {
        PathRequest::default()
    } else {
        serde_json::from_slice::<PathRequest>(&body)?
    };
    let path = request
        .path
        .unwrap_or_else(|| state.config.default_path.clone());

    let config = ScanConfig::builder()
        .root(path.clone())
        .ignore(state.config.ignore.clone())
        .allowed_extensions(params.ext.as_deref().and_then(ExtensionFilter::parse))
        .build()
        .map_err(|err| ScanError::InvalidConfig {
            message: err.to_string(),
        })?;

    let result = tokio::task::spawn_blocking(move || ExtensionScanner::new().scan(&config)).await??;

    Ok(match format {
        OutputFormat::Json => Json(PathReport::new(&path, &result)).into_response(),
        OutputFormat::Csv => csv_response(result),
    })
}

fn parse_format(raw: Option<&str>) -> Result<OutputFormat, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(OutputFormat::default()),
        Some(raw) => raw
            .parse()
            .map_err(|_| ApiError::UnknownFormat(raw.to_string())),
    }
}

/// Stream the CSV export as a download, one encoded row per body chunk.
fn csv_response(result: ScanResult) -> Response {
    let body = Body::from_stream(tokio_stream::iter(csv_rows(result)));
    (
        [
            (header::CONTENT_TYPE, OutputFormat::Csv.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{CSV_FILENAME}\""),
            ),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format(None).unwrap(), OutputFormat::Json);
        assert_eq!(parse_format(Some(" ")).unwrap(), OutputFormat::Json);
        assert_eq!(parse_format(Some("CSV")).unwrap(), OutputFormat::Csv);
        assert!(matches!(
            parse_format(Some("xml")),
            Err(ApiError::UnknownFormat(f)) if f == "xml"
        ));
    }
}
