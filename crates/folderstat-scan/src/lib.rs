//! Directory walking and per-extension aggregation for folderstat.
//!
//! # Overview
//!
//! `folderstat-scan` walks a directory tree once and folds every regular
//! file into per-extension counts and byte totals. Key features:
//!
//! - **Parallel traversal** via jwalk
//! - **Pruning** of ignored directories before descent
//! - **Allow-list filtering** of extensions
//! - **Upload staging** into self-cleaning temporary roots
//! - **Progress updates** via broadcast channels
//!
//! # Example
//!
//! ```rust,no_run
//! use folderstat_scan::{ExtensionScanner, ScanConfig};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let result = ExtensionScanner::new().scan(&config).unwrap();
//!
//! for (ext, stat) in &result.per_extension {
//!     println!("{ext}: {} files, {} bytes", stat.count, stat.total_bytes);
//! }
//! ```
//!
//! # Uploads
//!
//! ```rust,no_run
//! use folderstat_scan::{ExtensionScanner, UploadStager};
//!
//! let mut staged = UploadStager::new().stage().unwrap();
//! staged.write("holiday/beach.jpg", b"...").unwrap();
//!
//! let result = ExtensionScanner::new().scan_staged(&staged, None);
//! staged.cleanup();
//! assert_eq!(result.total_files, 1);
//! ```

mod aggregate;
mod progress;
mod scanner;
mod stage;
mod walker;

pub use aggregate::Aggregator;
pub use progress::ScanProgress;
pub use scanner::ExtensionScanner;
pub use stage::{StagedUpload, UploadStager, sanitize_relative};
pub use walker::{TreeWalker, WalkedFile};

// Re-export core types for convenience
pub use folderstat_core::{
    ExtensionFilter, ExtensionKey, ExtensionStat, IgnoreSet, ScanConfig, ScanError, ScanResult,
    ScanWarning, WarningKind,
};
