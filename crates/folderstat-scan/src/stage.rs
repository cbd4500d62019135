//! Temporary on-disk staging of uploaded files.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tempfile::TempDir;

use folderstat_core::ScanError;

/// Allocates a uniquely named temporary root per upload.
#[derive(Debug, Clone, Default)]
pub struct UploadStager {
    base: Option<PathBuf>,
}

impl UploadStager {
    /// Stage under the system temporary directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage under `base` instead of the system temporary directory.
    pub fn in_dir(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    /// Allocate a fresh, empty staging root.
    pub fn stage(&self) -> Result<StagedUpload, ScanError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("folderstat-");

        let dir = match &self.base {
            Some(base) => builder.tempdir_in(base),
            None => builder.tempdir(),
        }
        .map_err(|source| ScanError::Upload {
            path: self.base.clone().unwrap_or_else(std::env::temp_dir),
            source,
        })?;

        tracing::debug!(root = %dir.path().display(), "allocated staging root");

        Ok(StagedUpload {
            dir,
            files: BTreeSet::new(),
        })
    }
}

/// An uploaded file set reconstructed on disk.
///
/// The staging root is deleted recursively when this value is dropped,
/// whichever way the owning request ends. Deletion errors are ignored.
#[derive(Debug)]
pub struct StagedUpload {
    dir: TempDir,
    files: BTreeSet<PathBuf>,
}

impl StagedUpload {
    /// Root directory of the staged tree.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Relative paths written so far, in order.
    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Write `contents` at the client-declared relative path.
    ///
    /// Writing the same path twice keeps the last contents and records the
    /// path once.
    pub fn write(&mut self, declared: &str, contents: &[u8]) -> Result<(), ScanError> {
        let relative = sanitize_relative(declared)?;
        let full = self.dir.path().join(&relative);

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| ScanError::upload(&relative, e))?;
        }
        fs::write(&full, contents).map_err(|e| ScanError::upload(&relative, e))?;

        self.files.insert(relative);
        Ok(())
    }

    /// Remove the staging root now.
    pub fn cleanup(self) {
        let root = self.dir.path().to_path_buf();
        if let Err(err) = self.dir.close() {
            tracing::warn!(root = %root.display(), error = %err, "failed to remove staging root");
        }
    }
}

/// Turn a client-declared upload name into a path that stays inside the
/// staging root.
///
/// Both `/` and `\` separate components. `.` components are dropped; `..`,
/// absolute paths and drive prefixes are rejected, as is a name with no
/// components left.
pub fn sanitize_relative(declared: &str) -> Result<PathBuf, ScanError> {
    let unsafe_path = || ScanError::UnsafeUploadPath {
        path: declared.to_string(),
    };

    if declared.starts_with(['/', '\\']) {
        return Err(unsafe_path());
    }

    let mut relative = PathBuf::new();
    for part in declared.split(['/', '\\']) {
        if part.is_empty() {
            continue;
        }
        match Path::new(part).components().next() {
            Some(Component::Normal(name)) if Path::new(part).components().count() == 1 => {
                relative.push(name);
            }
            Some(Component::CurDir) => {}
            _ => return Err(unsafe_path()),
        }
    }

    if relative.as_os_str().is_empty() {
        return Err(unsafe_path());
    }
    Ok(relative)
}
