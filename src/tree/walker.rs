//! TreeWalker - recursive size and statistics walk

use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::stats::{DirectoryStats, extension_of};

use super::config::WalkerConfig;
use super::traversal::{EntryKind, EntrySource, HostEntries, validate_root};

/// Depth-first walker over a directory tree.
///
/// Children are visited in file-name order. Symlinks below the root are
/// never followed.
#[derive(Debug, Clone, Default)]
pub struct TreeWalker {
    pub(super) config: WalkerConfig,
}

impl TreeWalker {
    pub fn new(config: WalkerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walk `root` and collect statistics for everything reachable from it.
    ///
    /// Fails only when `root` is not a directory or cannot be read. Entries
    /// below the root that cannot be read are listed in
    /// [`DirectoryStats::inaccessible_paths`] and left out of the totals.
    pub fn compute_statistics(&self, root: &Path) -> Result<DirectoryStats> {
        let root = validate_root(root)?;
        let stats = self.collect_statistics(&HostEntries, &root);

        info!(
            "Scanned {}: {} files, {} directories, {} bytes",
            root.display(),
            stats.file_count(),
            stats.directory_count(),
            stats.total_size()
        );
        Ok(stats)
    }

    /// Total size in bytes of every readable file below `root`.
    pub fn directory_size(&self, root: &Path) -> Result<u64> {
        self.compute_statistics(root).map(|stats| stats.total_size())
    }

    /// Walk an already validated root. The root is always descended into as
    /// a directory, even when it is reached through a symlink.
    fn collect_statistics<S: EntrySource + ?Sized>(
        &self,
        source: &S,
        root: &Path,
    ) -> DirectoryStats {
        let mut stats = DirectoryStats::new(&self.config);
        if let Err(e) = visit_dir(source, root, &mut stats) {
            debug!("Cannot read {}: {}", root.display(), e);
            stats.add_inaccessible_path(root);
        }
        stats
    }
}

/// Visit one entry and return the bytes of all files beneath it.
///
/// Only files add to the total size; a directory's subtotal is returned to
/// its parent but never recorded again. An `Err` means the entry itself
/// could not be read and is recorded by the caller.
fn visit_size<S: EntrySource + ?Sized>(
    source: &S,
    path: &Path,
    stats: &mut DirectoryStats,
) -> io::Result<u64> {
    match source.entry_kind(path)? {
        EntryKind::File { len } => {
            let name = path
                .file_name()
                .map(|s| s.to_string_lossy())
                .unwrap_or_default();
            stats.record_file(len, path);
            stats.add_extension_size(extension_of(&name), len);
            Ok(len)
        }
        EntryKind::Dir => visit_dir(source, path, stats),
        EntryKind::Skipped => Ok(0),
    }
}

/// Count a directory and visit its children.
///
/// A directory with entries that could not be read is itself recorded as
/// inaccessible; its readable children are still visited.
fn visit_dir<S: EntrySource + ?Sized>(
    source: &S,
    path: &Path,
    stats: &mut DirectoryStats,
) -> io::Result<u64> {
    stats.record_directory();
    let listing = source.list_dir(path)?;
    if listing.log_errors(path) {
        stats.add_inaccessible_path(path);
    }

    let mut subtotal = 0;
    for child in listing.children {
        match visit_size(source, &child, stats) {
            Ok(size) => subtotal += size,
            Err(e) => {
                debug!("Cannot read {}: {}", child.display(), e);
                stats.add_inaccessible_path(&child);
            }
        }
    }
    Ok(subtotal)
}
