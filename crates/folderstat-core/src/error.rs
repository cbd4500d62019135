//! Error types for scanning and staging operations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a scan or an upload.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root does not exist or is not a directory.
    #[error("Invalid path {path}: {reason}")]
    InvalidPath { path: PathBuf, reason: &'static str },

    /// Permission denied for the scan root.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Uploaded file declared a path that escapes the staging root.
    #[error("Unsafe upload path: {path}")]
    UnsafeUploadPath { path: String },

    /// Two uploaded paths collide, e.g. `a` and `a/b.txt`.
    #[error("Upload path conflicts with another uploaded file: {path}")]
    UploadConflict { path: PathBuf },

    /// Failed to write an uploaded file to temporary storage.
    #[error("Failed to stage upload {path}: {source}")]
    Upload {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::InvalidPath {
                path,
                reason: "path does not exist",
            },
            _ => Self::Io { path, source },
        }
    }

    /// Create a staging error, separating path collisions between uploaded
    /// files from storage faults.
    pub fn upload(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::AlreadyExists
            | std::io::ErrorKind::NotADirectory
            | std::io::ErrorKind::IsADirectory => Self::UploadConflict { path },
            _ => Self::Upload { path, source },
        }
    }

    /// Whether the error was caused by the caller's input rather than an
    /// internal fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidPath { .. }
                | Self::UnsafeUploadPath { .. }
                | Self::UploadConflict { .. }
                | Self::InvalidConfig { .. }
        )
    }
}

/// Kind of scan warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    /// Permission was denied.
    PermissionDenied,
    /// Error reading a directory.
    ReadError,
    /// Error reading metadata, e.g. the file vanished mid-scan.
    MetadataError,
}

/// Non-fatal problem absorbed during a scan. The affected entry is left out
/// of the aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanWarning {
    /// Path where the warning occurred.
    pub path: PathBuf,
    /// Human-readable message.
    pub message: String,
    /// Kind of warning.
    pub kind: WarningKind,
}

impl ScanWarning {
    /// Create a new scan warning.
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>, kind: WarningKind) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            kind,
        }
    }

    /// Create a warning from an I/O error, classifying permission problems.
    pub fn from_io(path: impl Into<PathBuf>, error: &std::io::Error) -> Self {
        let kind = match error.kind() {
            std::io::ErrorKind::PermissionDenied => WarningKind::PermissionDenied,
            _ => WarningKind::MetadataError,
        };
        Self::new(path, error.to_string(), kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_error_io() {
        let err = ScanError::io(
            "/test/path",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, ScanError::PermissionDenied { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_missing_path_is_client_error() {
        let err = ScanError::io(
            "/missing",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(matches!(err, ScanError::InvalidPath { .. }));
        assert!(err.is_client_error());
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_upload_conflict_is_client_error() {
        let err = ScanError::upload(
            "a/b.txt",
            std::io::Error::new(std::io::ErrorKind::NotADirectory, "not a directory"),
        );
        assert!(matches!(err, ScanError::UploadConflict { .. }));
        assert!(err.is_client_error());

        let err = ScanError::upload(
            "a",
            std::io::Error::new(std::io::ErrorKind::StorageFull, "disk full"),
        );
        assert!(matches!(err, ScanError::Upload { .. }));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_warning_from_io() {
        let denied = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let warning = ScanWarning::from_io("/test/path", &denied);
        assert_eq!(warning.kind, WarningKind::PermissionDenied);

        let gone = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let warning = ScanWarning::from_io("/test/other", &gone);
        assert_eq!(warning.kind, WarningKind::MetadataError);
    }
}
