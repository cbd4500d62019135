//! Extension classification and allow-list filtering.

use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;

use compact_str::CompactString;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Normalized grouping key for a file: the lower-cased suffix including its
/// leading dot (`.txt`), or [`ExtensionKey::NO_EXTENSION`].
///
/// Deserialized keys go through the same normalization as filter entries,
/// so `"JPG"` and `".jpg"` read back as the same key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ExtensionKey(CompactString);

impl ExtensionKey {
    /// Sentinel for files without an extension.
    ///
    /// Older deployments of the path service reported these files under
    /// `others`; every surface of folderstat uses `no_extension`.
    pub const NO_EXTENSION: &'static str = "no_extension";

    /// Classify a bare file name.
    ///
    /// Leading dots belong to the name, not the extension, so `.gitignore`
    /// has no extension. A trailing dot (`notes.`) has nothing after it and
    /// also maps to the sentinel.
    pub fn from_file_name(name: &str) -> Self {
        let stem_start = name.len() - name.trim_start_matches('.').len();
        let rest = &name[stem_start..];

        match rest.rfind('.') {
            Some(idx) if idx + 1 < rest.len() => Self(CompactString::new(rest[idx..].to_lowercase())),
            _ => Self::no_extension(),
        }
    }

    /// Classify the final component of a path.
    pub fn from_path(path: &Path) -> Self {
        match path.file_name() {
            Some(name) => Self::from_file_name(&name.to_string_lossy()),
            None => Self::no_extension(),
        }
    }

    /// The sentinel key.
    pub fn no_extension() -> Self {
        Self(CompactString::new(Self::NO_EXTENSION))
    }

    /// Whether this key is the sentinel.
    pub fn is_no_extension(&self) -> bool {
        self.0 == Self::NO_EXTENSION
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExtensionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ExtensionKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for ExtensionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = CompactString::deserialize(deserializer)?;
        normalize_entry(&raw).ok_or_else(|| D::Error::custom("empty extension key"))
    }
}

impl AsRef<str> for ExtensionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Per-request allow-list of extensions.
///
/// Files whose key is not a member are skipped by the walker entirely and
/// never reach the aggregates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionFilter {
    allowed: BTreeSet<ExtensionKey>,
}

impl ExtensionFilter {
    /// Build a filter from individual entries (`jpg`, `.JPG`, `no_extension`).
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = entries
            .into_iter()
            .filter_map(|entry| normalize_entry(entry.as_ref()))
            .collect();
        Self { allowed }
    }

    /// Parse a comma-separated list. Returns `None` when the list has no
    /// usable entries, which means "count everything".
    pub fn parse(list: &str) -> Option<Self> {
        let filter = Self::new(list.split(','));
        (!filter.is_empty()).then_some(filter)
    }

    /// Whether files with this key should be counted.
    pub fn allows(&self, key: &ExtensionKey) -> bool {
        self.allowed.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    /// Iterate the allowed keys in order.
    pub fn iter(&self) -> impl Iterator<Item = &ExtensionKey> {
        self.allowed.iter()
    }
}

fn normalize_entry(entry: &str) -> Option<ExtensionKey> {
    let entry = entry.trim();
    if entry.is_empty() || entry == "." {
        return None;
    }
    if entry.eq_ignore_ascii_case(ExtensionKey::NO_EXTENSION) {
        return Some(ExtensionKey::no_extension());
    }

    let lowered = entry.to_lowercase();
    let key = if lowered.starts_with('.') {
        CompactString::new(lowered)
    } else {
        compact_str::format_compact!(".{lowered}")
    };
    Some(ExtensionKey(key))
}
