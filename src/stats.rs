//! Directory statistics accumulation
//!
//! `DirectoryStats` is the record a statistics walk fills in: byte totals,
//! file and directory counts, the largest file, a per-extension size
//! breakdown and the paths that could not be read.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::tree::WalkerConfig;

/// Label used for files whose name has no usable extension.
pub const NO_EXTENSION: &str = "no extension";

/// Cumulative byte size for one extension label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtensionSize {
    /// Extension label (without the dot) or `"no extension"`
    pub extension: String,
    /// Sum of the sizes of every file with this label
    pub size: u64,
}

/// The largest file seen so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LargestFile {
    pub size: u64,
    pub path: PathBuf,
}

/// Aggregate statistics collected during a single tree walk.
///
/// Counters only ever grow while the walk runs. Once the walk returns, the
/// caller owns the record and may only read it or reorder its extension list
/// with [`DirectoryStats::sort_extensions_by_size`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct DirectoryStats {
    total_size: u64,
    file_count: u64,
    directory_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    largest_file: Option<LargestFile>,
    extensions: Vec<ExtensionSize>,
    inaccessible: Vec<PathBuf>,
    #[serde(skip)]
    max_extensions: Option<usize>,
    #[serde(skip)]
    max_inaccessible: Option<usize>,
}

impl DirectoryStats {
    /// Create an empty record honouring the capacity limits in `config`.
    pub fn new(config: &WalkerConfig) -> Self {
        Self {
            max_extensions: config.max_extensions,
            max_inaccessible: config.max_inaccessible,
            ..Default::default()
        }
    }

    /// Record a file of `size` bytes found at `path`.
    ///
    /// A file only replaces the current largest file when it is strictly
    /// bigger, so the first file to reach a given size keeps the slot.
    pub fn record_file(&mut self, size: u64, path: &Path) {
        self.file_count += 1;
        self.total_size += size;

        if size > self.largest_file_size() {
            self.largest_file = Some(LargestFile {
                size,
                path: path.to_path_buf(),
            });
        }
    }

    /// Record a directory visit.
    pub fn record_directory(&mut self) {
        self.directory_count += 1;
    }

    /// Add `size` bytes to the running total for `extension`.
    ///
    /// New labels are appended in first-seen order. When the extension limit
    /// is reached, sizes for unseen labels are dropped.
    pub fn add_extension_size(&mut self, extension: &str, size: u64) {
        if let Some(entry) = self
            .extensions
            .iter_mut()
            .find(|e| e.extension == extension)
        {
            entry.size += size;
            return;
        }

        if self
            .max_extensions
            .is_some_and(|max| self.extensions.len() >= max)
        {
            debug!("Extension limit reached, dropping {} bytes of '{}'", size, extension);
            return;
        }

        self.extensions.push(ExtensionSize {
            extension: extension.to_string(),
            size,
        });
    }

    /// Remember a path that could not be read.
    pub fn add_inaccessible_path(&mut self, path: &Path) {
        if self
            .max_inaccessible
            .is_some_and(|max| self.inaccessible.len() >= max)
        {
            debug!("Inaccessible path limit reached, dropping {}", path.display());
            return;
        }
        self.inaccessible.push(path.to_path_buf());
    }

    /// Sort the extension list by ascending size, in place.
    pub fn sort_extensions_by_size(&mut self) {
        self.extensions.sort_by_key(|e| e.size);
    }

    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    pub fn file_count(&self) -> u64 {
        self.file_count
    }

    pub fn directory_count(&self) -> u64 {
        self.directory_count
    }

    /// Size of the largest file, 0 when no non-empty file was seen.
    pub fn largest_file_size(&self) -> u64 {
        self.largest_file.as_ref().map_or(0, |f| f.size)
    }

    /// Absolute path of the largest file, if any non-empty file was seen.
    pub fn largest_file_path(&self) -> Option<&Path> {
        self.largest_file.as_ref().map(|f| f.path.as_path())
    }

    pub fn extensions(&self) -> &[ExtensionSize] {
        &self.extensions
    }

    pub fn extension_count(&self) -> usize {
        self.extensions.len()
    }

    pub fn inaccessible_paths(&self) -> &[PathBuf] {
        &self.inaccessible
    }

    pub fn inaccessible_count(&self) -> usize {
        self.inaccessible.len()
    }
}

/// Extension label for a file name: the text after the last `.`.
///
/// Returns `"no extension"` when the name has no dot or ends with one.
pub fn extension_of(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(i) if i + 1 < file_name.len() => &file_name[i + 1..],
        _ => NO_EXTENSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unbounded() -> DirectoryStats {
        DirectoryStats::new(&WalkerConfig::default())
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("report.tar.gz"), "gz");
        assert_eq!(extension_of("main.rs"), "rs");
        assert_eq!(extension_of("README"), NO_EXTENSION);
        assert_eq!(extension_of("notes."), NO_EXTENSION);
        // Dotfiles keep everything after the leading dot
        assert_eq!(extension_of(".gitignore"), "gitignore");
        assert_eq!(extension_of(""), NO_EXTENSION);
    }

    #[test]
    fn test_record_file_updates_totals() {
        let mut stats = unbounded();
        stats.record_file(10, Path::new("/a"));
        stats.record_file(32, Path::new("/b"));

        assert_eq!(stats.file_count(), 2);
        assert_eq!(stats.total_size(), 42);
        assert_eq!(stats.largest_file_size(), 32);
        assert_eq!(stats.largest_file_path(), Some(Path::new("/b")));
    }

    #[test]
    fn test_largest_file_ties_keep_first() {
        let mut stats = unbounded();
        stats.record_file(100, Path::new("/first"));
        stats.record_file(100, Path::new("/second"));
        stats.record_file(50, Path::new("/third"));

        assert_eq!(stats.largest_file_size(), 100);
        assert_eq!(stats.largest_file_path(), Some(Path::new("/first")));
    }

    #[test]
    fn test_empty_files_never_become_largest() {
        let mut stats = unbounded();
        stats.record_file(0, Path::new("/empty"));

        assert_eq!(stats.largest_file_size(), 0);
        assert!(stats.largest_file_path().is_none());
    }

    #[test]
    fn test_record_directory() {
        let mut stats = unbounded();
        stats.record_directory();
        stats.record_directory();
        assert_eq!(stats.directory_count(), 2);
        assert_eq!(stats.file_count(), 0);
    }

    #[test]
    fn test_add_extension_size_merges_labels() {
        let mut stats = unbounded();
        stats.add_extension_size("rs", 10);
        stats.add_extension_size("md", 5);
        stats.add_extension_size("rs", 7);

        assert_eq!(
            stats.extensions(),
            &[
                ExtensionSize {
                    extension: "rs".to_string(),
                    size: 17
                },
                ExtensionSize {
                    extension: "md".to_string(),
                    size: 5
                },
            ]
        );
    }

    #[test]
    fn test_extension_limit_drops_new_labels() {
        let mut stats = DirectoryStats::new(&WalkerConfig {
            max_extensions: Some(1),
            ..Default::default()
        });
        stats.add_extension_size("rs", 10);
        stats.add_extension_size("md", 5);
        // Existing labels still accumulate at capacity
        stats.add_extension_size("rs", 1);

        assert_eq!(stats.extension_count(), 1);
        assert_eq!(stats.extensions()[0].size, 11);
    }

    #[test]
    fn test_zero_extension_limit_records_nothing() {
        let mut stats = DirectoryStats::new(&WalkerConfig {
            max_extensions: Some(0),
            max_inaccessible: Some(0),
        });
        stats.add_extension_size("rs", 10);
        stats.add_inaccessible_path(Path::new("/locked"));

        assert_eq!(stats.extension_count(), 0);
        assert_eq!(stats.inaccessible_count(), 0);
    }

    #[test]
    fn test_inaccessible_limit() {
        let mut stats = DirectoryStats::new(&WalkerConfig {
            max_inaccessible: Some(2),
            ..Default::default()
        });
        stats.add_inaccessible_path(Path::new("/a"));
        stats.add_inaccessible_path(Path::new("/b"));
        stats.add_inaccessible_path(Path::new("/c"));

        assert_eq!(
            stats.inaccessible_paths(),
            &[PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_sort_extensions_by_size() {
        let mut stats = unbounded();
        stats.add_extension_size("c", 30);
        stats.add_extension_size("a", 10);
        stats.add_extension_size("d", 30);
        stats.add_extension_size("b", 20);
        stats.sort_extensions_by_size();

        let sizes: Vec<u64> = stats.extensions().iter().map(|e| e.size).collect();
        assert_eq!(sizes, vec![10, 20, 30, 30]);
    }

    #[test]
    fn test_sort_extensions_degenerate_lists() {
        let mut stats = unbounded();
        stats.sort_extensions_by_size();
        assert!(stats.extensions().is_empty());

        stats.add_extension_size("rs", 3);
        stats.sort_extensions_by_size();
        assert_eq!(stats.extensions()[0].extension, "rs");
        assert_eq!(stats.extensions()[0].size, 3);
    }

    #[test]
    fn test_serializes_without_limits() {
        let mut stats = unbounded();
        stats.record_file(4, Path::new("/x.txt"));
        stats.add_extension_size("txt", 4);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["total_size"], 4);
        assert_eq!(json["largest_file"]["path"], "/x.txt");
        assert!(json.get("max_extensions").is_none());
    }
}
