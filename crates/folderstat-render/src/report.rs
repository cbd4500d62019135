//! JSON report shapes.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use folderstat_core::{ExtensionStat, ScanResult, format_size};

use crate::error::RenderError;

/// One extension's line in a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionSummary {
    pub count: u64,
    pub size_bytes: u64,
    pub size_human: String,
}

impl From<&ExtensionStat> for ExtensionSummary {
    fn from(stat: &ExtensionStat) -> Self {
        Self {
            count: stat.count,
            size_bytes: stat.total_bytes,
            size_human: format_size(stat.total_bytes),
        }
    }
}

fn summaries(result: &ScanResult) -> BTreeMap<String, ExtensionSummary> {
    result
        .per_extension
        .iter()
        .map(|(key, stat)| (key.to_string(), ExtensionSummary::from(stat)))
        .collect()
}

/// Report returned for an uploaded folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReport {
    pub total_files: u64,
    pub total_size_bytes: u64,
    pub total_size_human: String,
    /// Keyed by extension, in lexicographic order.
    pub extensions: BTreeMap<String, ExtensionSummary>,
}

impl UploadReport {
    pub fn new(result: &ScanResult) -> Self {
        Self {
            total_files: result.total_files,
            total_size_bytes: result.total_bytes,
            total_size_human: format_size(result.total_bytes),
            extensions: summaries(result),
        }
    }
}

/// Report returned for a scan of a host path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathReport {
    pub path: String,
    pub total_files: u64,
    /// Total size in bytes.
    pub total_size: u64,
    pub total_size_human: String,
    /// Keyed by extension, in lexicographic order.
    pub summary: BTreeMap<String, ExtensionSummary>,
}

impl PathReport {
    pub fn new(path: &Path, result: &ScanResult) -> Self {
        Self {
            path: path.display().to_string(),
            total_files: result.total_files,
            total_size: result.total_bytes,
            total_size_human: format_size(result.total_bytes),
            summary: summaries(result),
        }
    }
}

/// Serialize a report to a JSON string.
pub fn to_json<T: Serialize>(report: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string(report)?)
}

/// Serialize a report to indented JSON.
pub fn to_json_pretty<T: Serialize>(report: &T) -> Result<String, RenderError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folderstat_core::ExtensionKey;

    fn sample() -> ScanResult {
        let mut map = BTreeMap::new();
        map.insert(
            ExtensionKey::from_file_name("b.zip"),
            ExtensionStat { count: 1, total_bytes: 2048 },
        );
        map.insert(
            ExtensionKey::from_file_name("a.txt"),
            ExtensionStat { count: 3, total_bytes: 1536 },
        );
        ScanResult::from_stats(map, Vec::new())
    }

    #[test]
    fn test_upload_report_shape() {
        let json = to_json(&UploadReport::new(&sample())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total_files"], 4);
        assert_eq!(value["total_size_bytes"], 3584);
        assert_eq!(value["total_size_human"], "3.50 KB");
        assert_eq!(value["extensions"][".txt"]["count"], 3);
        assert_eq!(value["extensions"][".txt"]["size_human"], "1.50 KB");
        assert_eq!(value["extensions"][".zip"]["size_bytes"], 2048);
    }

    #[test]
    fn test_keys_are_sorted() {
        let json = to_json(&UploadReport::new(&sample())).unwrap();
        let txt = json.find("\".txt\"").unwrap();
        let zip = json.find("\".zip\"").unwrap();
        assert!(txt < zip);
    }

    #[test]
    fn test_path_report_shape() {
        let report = PathReport::new(Path::new("/srv/data"), &sample());
        let value: serde_json::Value =
            serde_json::from_str(&to_json_pretty(&report).unwrap()).unwrap();

        assert_eq!(value["path"], "/srv/data");
        assert_eq!(value["total_files"], 4);
        assert_eq!(value["total_size"], 3584);
        assert_eq!(value["summary"][".zip"]["count"], 1);
    }

    #[test]
    fn test_empty_result() {
        let report = UploadReport::new(&ScanResult::default());
        assert_eq!(report.total_size_human, "0.00 B");
        assert!(report.extensions.is_empty());
    }
}
