//! Bottom-up removal of empty files and directories

use std::fs;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;

use super::output::{RemovedKind, WalkEvent, WalkOutput};
use super::traversal::{
    EntryKind, EntrySource, HostEntries, is_empty_dir, is_symlink, validate_root,
};
use super::walker::TreeWalker;

impl TreeWalker {
    /// Delete zero-length files, then every directory left empty, including
    /// `root` itself.
    ///
    /// Children are handled before their parent. A failed deletion leaves
    /// that entry in place and the walk continues. Returns `true` if anything
    /// anywhere in the tree was deleted. Deletions are never retried.
    ///
    /// A `root` that is a symlink is pruned through, but the link itself is
    /// kept.
    pub fn prune_empty<O: WalkOutput + ?Sized>(&self, root: &Path, output: &mut O) -> Result<bool> {
        let root = validate_root(root)?;
        let removable = !is_symlink(&root);
        let removed = prune_dir(&HostEntries, &root, removable, output)?;
        info!("Pruned {}: removed={}", root.display(), removed);
        Ok(removed)
    }
}

fn prune_entry<S, O>(source: &S, path: &Path, output: &mut O) -> Result<bool>
where
    S: EntrySource + ?Sized,
    O: WalkOutput + ?Sized,
{
    let kind = match source.entry_kind(path) {
        Ok(kind) => kind,
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            return Ok(false);
        }
    };

    match kind {
        EntryKind::File { len: 0 } => match fs::remove_file(path) {
            Ok(()) => {
                output.emit(WalkEvent::Removed {
                    path: path.to_path_buf(),
                    kind: RemovedKind::File,
                })?;
                Ok(true)
            }
            Err(e) => {
                warn!("Failed to delete {}: {}", path.display(), e);
                Ok(false)
            }
        },
        EntryKind::Dir => prune_dir(source, path, true, output),
        EntryKind::File { .. } | EntryKind::Skipped => Ok(false),
    }
}

/// Prune a directory's children, then the directory itself if it is left
/// empty and `removable`.
fn prune_dir<S, O>(source: &S, path: &Path, removable: bool, output: &mut O) -> Result<bool>
where
    S: EntrySource + ?Sized,
    O: WalkOutput + ?Sized,
{
    let listing = match source.list_dir(path) {
        Ok(listing) => listing,
        Err(e) => {
            debug!("Cannot read {}: {}", path.display(), e);
            return Ok(false);
        }
    };
    listing.log_errors(path);

    let mut removed = false;
    for child in &listing.children {
        removed |= prune_entry(source, child, output)?;
    }

    if !removable {
        return Ok(removed);
    }

    match is_empty_dir(path) {
        Ok(true) => match fs::remove_dir(path) {
            Ok(()) => {
                output.emit(WalkEvent::Removed {
                    path: path.to_path_buf(),
                    kind: RemovedKind::Directory,
                })?;
                removed = true;
            }
            Err(e) => warn!("Failed to delete {}: {}", path.display(), e),
        },
        Ok(false) => {}
        Err(e) => debug!("Cannot read {}: {}", path.display(), e),
    }
    Ok(removed)
}
