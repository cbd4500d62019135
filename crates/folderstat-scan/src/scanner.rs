//! Single-pass scan: walk, classify, aggregate.

use std::time::Instant;

use tokio::sync::broadcast;

use folderstat_core::{ExtensionFilter, ScanConfig, ScanError, ScanResult};

use crate::aggregate::Aggregator;
use crate::progress::ScanProgress;
use crate::stage::StagedUpload;
use crate::walker::TreeWalker;

/// Files counted between progress snapshots.
const PROGRESS_INTERVAL: u64 = 1000;

/// Scanner producing per-extension statistics.
///
/// Each call walks from scratch; nothing is cached between scans.
pub struct ExtensionScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
}

impl ExtensionScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self { progress_tx }
    }

    /// Subscribe to scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan a directory on the host.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanResult, ScanError> {
        let walker = TreeWalker::filesystem(config)?;
        Ok(self.run(&walker))
    }

    /// Scan the files of a staged upload.
    pub fn scan_staged(
        &self,
        upload: &StagedUpload,
        filter: Option<&ExtensionFilter>,
    ) -> ScanResult {
        let walker = TreeWalker::staged(upload, filter.cloned());
        self.run(&walker)
    }

    fn run(&self, walker: &TreeWalker<'_>) -> ScanResult {
        let start = Instant::now();
        let mut aggregator = Aggregator::new();
        let mut progress = ScanProgress::new();

        let warnings = walker.walk(|file| {
            let snapshot_due = (aggregator.total_files() + 1) % PROGRESS_INTERVAL == 0;
            if snapshot_due {
                progress.current_path.clone_from(&file.path);
            }
            aggregator.record_file(file);

            if snapshot_due {
                progress.files_counted = aggregator.total_files();
                progress.bytes_counted = aggregator.total_bytes();
                progress.elapsed = start.elapsed();
                let _ = self.progress_tx.send(progress.clone());
            }
        });

        let result = aggregator.finish(warnings);

        progress.files_counted = result.total_files;
        progress.bytes_counted = result.total_bytes;
        progress.elapsed = start.elapsed();
        progress.finished = true;
        let _ = self.progress_tx.send(progress.clone());

        tracing::info!(
            root = %walker.root().display(),
            files = result.total_files,
            bytes = result.total_bytes,
            extensions = result.extension_count(),
            skipped = result.warnings.len(),
            elapsed_ms = progress.elapsed.as_millis() as u64,
            "scan complete"
        );

        result
    }
}

impl Default for ExtensionScanner {
    fn default() -> Self {
        Self::new()
    }
}
