//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::extension::{ExtensionFilter, ExtensionKey};
use crate::ignore::IgnoreSet;

/// Configuration for a filesystem scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Directory names that are never descended into.
    #[builder(default)]
    #[serde(default)]
    pub ignore: IgnoreSet,

    /// Only count files with these extensions (None = count everything).
    #[builder(default)]
    #[serde(default)]
    pub allowed_extensions: Option<ExtensionFilter>,

    /// Number of threads for scanning (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path with the default ignore
    /// set and no extension filter.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore: IgnoreSet::default(),
            allowed_extensions: None,
            threads: 0,
        }
    }

    /// Check if a directory should be pruned.
    pub fn should_ignore(&self, dir_name: &str) -> bool {
        self.ignore.contains(dir_name)
    }

    /// Check if a file with this extension should be counted.
    pub fn should_count(&self, key: &ExtensionKey) -> bool {
        self.allowed_extensions
            .as_ref()
            .is_none_or(|filter| filter.allows(key))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .threads(4usize)
            .allowed_extensions(ExtensionFilter::parse("jpg"))
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.threads, 4);
        assert!(config.allowed_extensions.is_some());
        assert!(config.should_ignore(".git"));
    }

    #[test]
    fn test_config_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/home/user");
        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert!(config.allowed_extensions.is_none());
        assert_eq!(config.threads, 0);
        assert!(config.should_count(&ExtensionKey::from_file_name("any.bin")));
    }

    #[test]
    fn test_should_count_with_filter() {
        let config = ScanConfig::builder()
            .root("/test")
            .allowed_extensions(ExtensionFilter::parse(".jpg"))
            .ignore(IgnoreSet::empty())
            .build()
            .unwrap();

        assert!(config.should_count(&ExtensionKey::from_file_name("a.JPG")));
        assert!(!config.should_count(&ExtensionKey::from_file_name("a.png")));
        assert!(!config.should_ignore(".git"));
    }
}
