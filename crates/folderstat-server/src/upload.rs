//! Folder-upload service.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Query, State};
use axum::response::Html;
use serde::Deserialize;

use folderstat_core::ExtensionFilter;
use folderstat_render::UploadReport;
use folderstat_scan::ExtensionScanner;

use crate::config::AppState;
use crate::error::ApiError;

/// Multipart field carrying the uploaded files.
pub const FILES_FIELD: &str = "files";

const INDEX_HTML: &str = include_str!("../assets/index.html");

#[derive(Debug, Default, Deserialize)]
pub struct UploadParams {
    /// Comma-separated extension allow-list.
    pub ext: Option<String>,
}

/// `GET /` - the upload page.
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// `POST /analyze` - stage the uploaded files, aggregate them, discard the
/// staging root.
///
/// Each `files` field's file name is its path relative to the uploaded
/// folder. Fields with other names, or without a file name, are ignored.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<Json<UploadReport>, ApiError> {
    let filter = params.ext.as_deref().and_then(ExtensionFilter::parse);
    let mut staged = state.stager.stage()?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let Some(name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let contents = field.bytes().await?;

        staged = tokio::task::spawn_blocking(move || {
            staged.write(&name, &contents)?;
            Ok::<_, ApiError>(staged)
        })
        .await??;
    }

    if staged.is_empty() {
        return Err(ApiError::NoFiles);
    }

    let uploaded = staged.len();
    let result = tokio::task::spawn_blocking(move || {
        let result = ExtensionScanner::new().scan_staged(&staged, filter.as_ref());
        staged.cleanup();
        result
    })
    .await?;

    tracing::info!(
        uploaded,
        counted = result.total_files,
        bytes = result.total_bytes,
        "upload analyzed"
    );

    Ok(Json(UploadReport::new(&result)))
}
