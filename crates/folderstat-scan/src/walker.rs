//! Tree traversal for real directories and staged uploads.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};

use folderstat_core::{
    ExtensionFilter, ExtensionKey, IgnoreSet, ScanConfig, ScanError, ScanWarning, WarningKind,
};

use crate::stage::StagedUpload;

/// A regular file that passed classification and filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Absolute path in filesystem mode, path relative to the staging root
    /// in staged mode.
    pub path: PathBuf,
    /// Classified extension.
    pub extension: ExtensionKey,
    /// File length in bytes.
    pub size: u64,
}

enum Source<'a> {
    Filesystem {
        root: PathBuf,
        ignore: Arc<IgnoreSet>,
        threads: usize,
    },
    Staged(&'a StagedUpload),
}

/// Yields the regular files under a root, one at a time.
///
/// Symbolic links are never followed and never counted, so traversal
/// always terminates. Directories named in the ignore set are removed from
/// their parent's listing before the walker descends into them.
pub struct TreeWalker<'a> {
    source: Source<'a>,
    filter: Option<ExtensionFilter>,
}

impl TreeWalker<'static> {
    /// Walker over a directory on the host.
    ///
    /// Fails with [`ScanError::InvalidPath`] when the root is missing or is
    /// not a directory, and with [`ScanError::PermissionDenied`] when it
    /// cannot be listed.
    pub fn filesystem(config: &ScanConfig) -> Result<Self, ScanError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        // Verify root is a directory
        let metadata = std::fs::metadata(&root).map_err(|e| ScanError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(ScanError::InvalidPath {
                path: config.root.clone(),
                reason: "not a directory",
            });
        }

        // The walker only reports an unlistable directory on its entry, so
        // check the root up front.
        std::fs::read_dir(&root).map_err(|e| ScanError::io(&root, e))?;

        Ok(Self {
            source: Source::Filesystem {
                root,
                ignore: Arc::new(config.ignore.clone()),
                threads: config.threads,
            },
            filter: config.allowed_extensions.clone(),
        })
    }
}

impl<'a> TreeWalker<'a> {
    /// Walker over the files recorded in a staged upload. No directories are
    /// pruned; the upload is taken as already filtered by the client.
    pub fn staged(upload: &'a StagedUpload, filter: Option<ExtensionFilter>) -> Self {
        Self {
            source: Source::Staged(upload),
            filter,
        }
    }

    /// Root of the walk.
    pub fn root(&self) -> &Path {
        match &self.source {
            Source::Filesystem { root, .. } => root,
            Source::Staged(upload) => upload.root(),
        }
    }

    /// Walk the tree, handing every counted file to `visit`.
    ///
    /// Entries that cannot be read are skipped and returned as warnings.
    pub fn walk<F>(&self, visit: F) -> Vec<ScanWarning>
    where
        F: FnMut(WalkedFile),
    {
        match &self.source {
            Source::Filesystem {
                root,
                ignore,
                threads,
            } => self.walk_filesystem(root, Arc::clone(ignore), *threads, visit),
            Source::Staged(upload) => self.walk_staged(upload, visit),
        }
    }

    fn accepts(&self, key: &ExtensionKey) -> bool {
        self.filter.as_ref().is_none_or(|filter| filter.allows(key))
    }

    fn walk_filesystem<F>(
        &self,
        root: &Path,
        ignore: Arc<IgnoreSet>,
        threads: usize,
        mut visit: F,
    ) -> Vec<ScanWarning>
    where
        F: FnMut(WalkedFile),
    {
        let parallelism = match threads {
            0 => Parallelism::RayonDefaultPool {
                busy_timeout: Duration::from_millis(100),
            },
            n => Parallelism::RayonNewPool(n),
        };

        let walker = WalkDir::new(root)
            .parallelism(parallelism)
            .skip_hidden(false)
            .follow_links(false)
            .process_read_dir(move |depth, _path, _state, children| {
                // Called once with no depth for the root itself, which is
                // never pruned.
                if depth.is_none() {
                    return;
                }
                children.retain(|child| match child {
                    Ok(entry) => {
                        !(entry.file_type().is_dir()
                            && ignore.contains(&entry.file_name().to_string_lossy()))
                    }
                    Err(_) => true,
                });
            });

        let mut warnings = Vec::new();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                    tracing::debug!(path = %path.display(), error = %err, "skipping unreadable entry");
                    warnings.push(ScanWarning::new(path, err.to_string(), WarningKind::ReadError));
                    continue;
                }
            };

            if let Some(err) = &entry.read_children_error {
                let path = entry.path();
                tracing::debug!(path = %path.display(), error = %err, "skipping unreadable directory");
                let kind = match err.io_error().map(std::io::Error::kind) {
                    Some(std::io::ErrorKind::PermissionDenied) => WarningKind::PermissionDenied,
                    _ => WarningKind::ReadError,
                };
                warnings.push(ScanWarning::new(path, err.to_string(), kind));
                continue;
            }

            if !entry.file_type().is_file() {
                continue;
            }

            let extension = ExtensionKey::from_file_name(&entry.file_name().to_string_lossy());
            if !self.accepts(&extension) {
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    tracing::debug!(path = %path.display(), error = %err, "skipping file without metadata");
                    warnings.push(ScanWarning::new(
                        &path,
                        err.to_string(),
                        WarningKind::MetadataError,
                    ));
                    continue;
                }
            };

            visit(WalkedFile {
                path,
                extension,
                size: metadata.len(),
            });
        }

        warnings
    }

    fn walk_staged<F>(&self, upload: &StagedUpload, mut visit: F) -> Vec<ScanWarning>
    where
        F: FnMut(WalkedFile),
    {
        let mut warnings = Vec::new();

        for relative in upload.files() {
            let extension = ExtensionKey::from_path(relative);
            if !self.accepts(&extension) {
                continue;
            }

            let full = upload.root().join(relative);
            let metadata = match std::fs::symlink_metadata(&full) {
                Ok(m) => m,
                Err(err) => {
                    tracing::debug!(path = %relative.display(), error = %err, "staged file unreadable");
                    warnings.push(ScanWarning::from_io(relative, &err));
                    continue;
                }
            };

            if !metadata.is_file() {
                continue;
            }

            visit(WalkedFile {
                path: relative.to_path_buf(),
                extension,
                size: metadata.len(),
            });
        }

        warnings
    }
}
