//! Streaming per-extension accumulation.

use std::collections::HashMap;

use folderstat_core::{ExtensionKey, ExtensionStat, ScanResult, ScanWarning};

use crate::walker::WalkedFile;

/// Accumulates walked files into per-extension statistics.
///
/// Holds one [`ExtensionStat`] per distinct extension and never buffers the
/// file list itself.
#[derive(Debug, Default)]
pub struct Aggregator {
    stats: HashMap<ExtensionKey, ExtensionStat>,
    total_files: u64,
    total_bytes: u64,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one file of `size` bytes under `extension`.
    pub fn record(&mut self, extension: ExtensionKey, size: u64) {
        self.stats.entry(extension).or_default().record(size);
        self.total_files += 1;
        self.total_bytes += size;
    }

    /// Count a walked file.
    pub fn record_file(&mut self, file: WalkedFile) {
        self.record(file.extension, file.size);
    }

    /// Count every file of an iterator.
    pub fn consume<I>(&mut self, files: I)
    where
        I: IntoIterator<Item = WalkedFile>,
    {
        for file in files {
            self.record_file(file);
        }
    }

    /// Files counted so far.
    pub fn total_files(&self) -> u64 {
        self.total_files
    }

    /// Bytes counted so far.
    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Close the accumulation into an ordered, immutable result.
    pub fn finish(self, warnings: Vec<ScanWarning>) -> ScanResult {
        let result = ScanResult::from_stats(self.stats.into_iter().collect(), warnings);
        debug_assert_eq!(result.total_files, self.total_files);
        debug_assert_eq!(result.total_bytes, self.total_bytes);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn walked(name: &str, size: u64) -> WalkedFile {
        WalkedFile {
            path: PathBuf::from(name),
            extension: ExtensionKey::from_file_name(name),
            size,
        }
    }

    #[test]
    fn test_record_accumulates() {
        let mut agg = Aggregator::new();
        agg.consume(vec![
            walked("a.jpg", 100),
            walked("b.JPG", 200),
            walked("c.jpg", 300),
            walked("Makefile", 7),
        ]);

        assert_eq!(agg.total_files(), 4);
        assert_eq!(agg.total_bytes(), 607);

        let result = agg.finish(Vec::new());
        assert_eq!(result.extension_count(), 2);
        assert_eq!(
            result.get(".jpg"),
            Some(&ExtensionStat { count: 3, total_bytes: 600 })
        );
        assert_eq!(result.get("no_extension").map(|s| s.total_bytes), Some(7));
        assert!(result.is_consistent());
    }

    #[test]
    fn test_order_independent() {
        let files = vec![walked("x.a", 1), walked("y.b", 2), walked("z.a", 3)];

        let mut forward = Aggregator::new();
        forward.consume(files.clone());

        let mut backward = Aggregator::new();
        backward.consume(files.into_iter().rev());

        assert_eq!(forward.finish(Vec::new()), backward.finish(Vec::new()));
    }

    #[test]
    fn test_empty_finish() {
        let result = Aggregator::new().finish(Vec::new());
        assert!(result.is_empty());
        assert!(result.per_extension.is_empty());
    }
}
