//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of files counted so far.
    pub files_counted: u64,
    /// Total bytes counted so far.
    pub bytes_counted: u64,
    /// Most recently counted path.
    pub current_path: PathBuf,
    /// Set on the final snapshot of a scan.
    pub finished: bool,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            files_counted: 0,
            bytes_counted: 0,
            current_path: PathBuf::new(),
            finished: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate scan rate in files per second.
    pub fn files_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.files_counted as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}
