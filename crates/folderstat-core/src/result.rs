//! Per-extension statistics and finished scan results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::extension::ExtensionKey;

/// Count and byte total for one extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStat {
    /// Number of files.
    pub count: u64,
    /// Sum of file sizes in bytes.
    pub total_bytes: u64,
}

impl ExtensionStat {
    /// Add one file of the given size.
    pub fn record(&mut self, size: u64) {
        self.count += 1;
        self.total_bytes += size;
    }
}

/// Outcome of one scan.
///
/// `total_files` and `total_bytes` always equal the sums over
/// `per_extension`. Extensions are ordered lexicographically.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    /// Number of counted files.
    pub total_files: u64,
    /// Sum of counted file sizes.
    pub total_bytes: u64,
    /// Statistics keyed by extension.
    pub per_extension: BTreeMap<ExtensionKey, ExtensionStat>,
    /// Entries skipped because they could not be read.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<ScanWarning>,
}

impl ScanResult {
    /// Build a result from finished per-extension statistics, deriving the
    /// totals from them.
    pub fn from_stats(
        per_extension: BTreeMap<ExtensionKey, ExtensionStat>,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        let (total_files, total_bytes) = per_extension
            .values()
            .fold((0, 0), |(files, bytes), stat| {
                (files + stat.count, bytes + stat.total_bytes)
            });

        Self {
            total_files,
            total_bytes,
            per_extension,
            warnings,
        }
    }

    /// Statistics for one extension, if any file had it.
    pub fn get(&self, key: &str) -> Option<&ExtensionStat> {
        self.per_extension.get(key)
    }

    /// Number of distinct extensions.
    pub fn extension_count(&self) -> usize {
        self.per_extension.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total_files == 0
    }

    /// Check the totals invariant.
    pub fn is_consistent(&self) -> bool {
        let files: u64 = self.per_extension.values().map(|s| s.count).sum();
        let bytes: u64 = self.per_extension.values().map(|s| s.total_bytes).sum();
        files == self.total_files && bytes == self.total_bytes
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
