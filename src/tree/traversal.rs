//! Common tree traversal helpers shared by every walk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, WalkError};

/// How a walk treats a single entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File { len: u64 },
    Dir,
    /// Symlinks and special files; never followed, counted or deleted
    Skipped,
}

/// Children of one directory.
#[derive(Debug, Default)]
pub struct DirListing {
    /// Full child paths, sorted by file name
    pub children: Vec<PathBuf>,
    /// Entries the directory reported but that could not be read
    pub errors: Vec<io::Error>,
}

impl DirListing {
    /// Log every unreadable entry. Returns `true` if there were any.
    pub fn log_errors(&self, dir: &Path) -> bool {
        for e in &self.errors {
            debug!("Cannot read entry in {}: {}", dir.display(), e);
        }
        !self.errors.is_empty()
    }
}

/// The file-system queries a walk descends with.
pub trait EntrySource {
    /// Classify `path` without following symlinks.
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind>;

    /// List the children of the directory at `path`.
    fn list_dir(&self, path: &Path) -> io::Result<DirListing>;
}

/// [`EntrySource`] backed by the host file system.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostEntries;

impl EntrySource for HostEntries {
    fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
        entry_kind(path)
    }

    fn list_dir(&self, path: &Path) -> io::Result<DirListing> {
        read_sorted_children(path)
    }
}

/// Classify an entry without following symlinks.
pub fn entry_kind(path: &Path) -> io::Result<EntryKind> {
    let meta = fs::symlink_metadata(path)?;
    let file_type = meta.file_type();

    Ok(if file_type.is_file() {
        EntryKind::File { len: meta.len() }
    } else if file_type.is_dir() {
        EntryKind::Dir
    } else {
        EntryKind::Skipped
    })
}

/// Check that `root` is a readable directory and return its absolute path.
///
/// `root` itself may be a symlink to a directory; walks descend into it as a
/// directory. Any failure to list it is reported as
/// [`WalkError::AccessDenied`].
pub fn validate_root(root: &Path) -> Result<PathBuf> {
    let invalid = || WalkError::InvalidPath {
        path: root.to_path_buf(),
    };

    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        _ => return Err(invalid()),
    }

    let absolute = std::path::absolute(root).map_err(|_| invalid())?;

    match fs::read_dir(&absolute) {
        Ok(_) => Ok(absolute),
        Err(source) => Err(WalkError::AccessDenied {
            path: absolute,
            source,
        }),
    }
}

/// Check whether `path` itself is a symbolic link.
pub fn is_symlink(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
}

/// Read a directory's children as full paths, sorted by file name.
///
/// Entries that fail to read are kept as errors in the listing.
pub fn read_sorted_children(path: &Path) -> io::Result<DirListing> {
    let mut entries = Vec::new();
    let mut errors = Vec::new();
    for entry in fs::read_dir(path)? {
        match entry {
            Ok(entry) => entries.push(entry),
            Err(e) => errors.push(e),
        }
    }
    entries.sort_by_key(|a| a.file_name());

    Ok(DirListing {
        children: entries.into_iter().map(|e| e.path()).collect(),
        errors,
    })
}

/// Check whether a directory has no children left.
pub fn is_empty_dir(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// In-memory [`EntrySource`] that can fail on chosen paths.
#[cfg(test)]
pub mod fake {
    use std::collections::BTreeMap;
    use std::io;
    use std::path::{Path, PathBuf};

    use super::{DirListing, EntryKind, EntrySource};

    #[derive(Debug, Clone, Copy)]
    enum Node {
        File(u64),
        Dir { broken_entries: usize },
        /// Classifies as a directory but cannot be listed
        LockedDir,
        /// Cannot even be classified
        Unreadable,
    }

    /// A tree described path by path. Parents must be added explicitly.
    #[derive(Debug, Default)]
    pub struct FakeEntries {
        nodes: BTreeMap<PathBuf, Node>,
    }

    impl FakeEntries {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn file(mut self, path: impl AsRef<Path>, len: u64) -> Self {
            self.nodes.insert(path.as_ref().to_path_buf(), Node::File(len));
            self
        }

        pub fn dir(mut self, path: impl AsRef<Path>) -> Self {
            self.nodes
                .insert(path.as_ref().to_path_buf(), Node::Dir { broken_entries: 0 });
            self
        }

        /// A directory whose listing also yields `broken` unreadable entries.
        pub fn dir_with_broken_entries(mut self, path: impl AsRef<Path>, broken: usize) -> Self {
            self.nodes.insert(
                path.as_ref().to_path_buf(),
                Node::Dir {
                    broken_entries: broken,
                },
            );
            self
        }

        pub fn locked_dir(mut self, path: impl AsRef<Path>) -> Self {
            self.nodes.insert(path.as_ref().to_path_buf(), Node::LockedDir);
            self
        }

        pub fn unreadable(mut self, path: impl AsRef<Path>) -> Self {
            self.nodes.insert(path.as_ref().to_path_buf(), Node::Unreadable);
            self
        }

        fn denied(path: &Path) -> io::Error {
            io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{}: permission denied", path.display()),
            )
        }
    }

    impl EntrySource for FakeEntries {
        fn entry_kind(&self, path: &Path) -> io::Result<EntryKind> {
            match self.nodes.get(path) {
                Some(Node::File(len)) => Ok(EntryKind::File { len: *len }),
                Some(Node::Dir { .. } | Node::LockedDir) => Ok(EntryKind::Dir),
                Some(Node::Unreadable) => Err(Self::denied(path)),
                None => Err(io::Error::from(io::ErrorKind::NotFound)),
            }
        }

        fn list_dir(&self, path: &Path) -> io::Result<DirListing> {
            let broken_entries = match self.nodes.get(path) {
                Some(Node::Dir { broken_entries }) => *broken_entries,
                Some(_) => return Err(Self::denied(path)),
                None => return Err(io::Error::from(io::ErrorKind::NotFound)),
            };

            // BTreeMap keys are already in path order, which matches name
            // order among siblings.
            let children = self
                .nodes
                .keys()
                .filter(|p| p.parent() == Some(path))
                .cloned()
                .collect();
            let errors = (0..broken_entries)
                .map(|_| io::Error::other("entry vanished while listing"))
                .collect();

            Ok(DirListing { children, errors })
        }
    }
}
