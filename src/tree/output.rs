//! Output sink for walk results

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// What kind of entry a prune walk deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovedKind {
    File,
    Directory,
}

/// A line of output produced by a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkEvent {
    /// A file whose name matched the search target
    FileFound { path: PathBuf },
    /// A file containing the search word `occurrences` times
    WordFound { path: PathBuf, occurrences: usize },
    /// An empty file or directory that was deleted
    Removed { path: PathBuf, kind: RemovedKind },
}

impl WalkEvent {
    pub fn path(&self) -> &Path {
        match self {
            WalkEvent::FileFound { path } => path,
            WalkEvent::WordFound { path, .. } => path,
            WalkEvent::Removed { path, .. } => path,
        }
    }
}

impl fmt::Display for WalkEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WalkEvent::FileFound { path } => write!(f, "{}", path.display()),
            WalkEvent::WordFound { path, occurrences } => {
                let name = path
                    .file_name()
                    .map(|s| s.to_string_lossy())
                    .unwrap_or_else(|| path.to_string_lossy());
                write!(f, "{}: {}", name, occurrences)
            }
            WalkEvent::Removed {
                path,
                kind: RemovedKind::File,
            } => write!(f, "Deleted empty file: {}", path.display()),
            WalkEvent::Removed {
                path,
                kind: RemovedKind::Directory,
            } => write!(f, "Deleted empty folder: {}", path.display()),
        }
    }
}

/// Receives walk output as it is produced, in traversal order.
pub trait WalkOutput {
    fn emit(&mut self, event: WalkEvent) -> io::Result<()>;
}

/// Collects events in memory.
impl WalkOutput for Vec<WalkEvent> {
    fn emit(&mut self, event: WalkEvent) -> io::Result<()> {
        self.push(event);
        Ok(())
    }
}
