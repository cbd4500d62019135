//! Directory names pruned from traversal.

use std::collections::HashSet;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Directory basenames skipped by default: VCS metadata, bytecode and
/// dependency caches, virtual environments.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".cache",
    "venv",
    ".venv",
];

/// Set of directory basenames that the walker never descends into.
///
/// Matching is exact and case-sensitive on the final path component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IgnoreSet {
    names: HashSet<CompactString>,
}

impl IgnoreSet {
    /// An empty set; nothing is pruned.
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Add a directory name.
    pub fn insert(&mut self, name: impl AsRef<str>) -> bool {
        self.names.insert(CompactString::new(name.as_ref()))
    }

    /// Builder-style [`IgnoreSet::insert`].
    pub fn with(mut self, name: impl AsRef<str>) -> Self {
        self.insert(name);
        self
    }

    /// Whether a directory with this basename is pruned.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for IgnoreSet {
    fn default() -> Self {
        DEFAULT_IGNORED_DIRS.iter().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::empty();
        set.extend(iter);
        set
    }
}

impl<S: AsRef<str>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for name in iter {
            self.insert(name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_members() {
        let set = IgnoreSet::default();
        for name in [".git", "__pycache__", "node_modules", ".cache", "venv", ".venv"] {
            assert!(set.contains(name), "expected {name} to be ignored");
        }
        assert!(!set.contains("src"));
    }

    #[test]
    fn test_exact_match_only() {
        let set = IgnoreSet::default();
        assert!(!set.contains(".GIT"));
        assert!(!set.contains("my_venv"));
    }

    #[test]
    fn test_extend_configured() {
        let mut set = IgnoreSet::empty();
        assert!(set.is_empty());

        set.extend(["target", "dist"]);
        let set = set.with("build");
        assert_eq!(set.len(), 3);
        assert!(set.contains("target"));
        assert!(!set.contains(".git"));
    }
}
