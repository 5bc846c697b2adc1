//! Directory tree walking logic
//!
//! `TreeWalker` runs four depth-first walks over a directory tree:
//!
//! - statistics: sizes, counts, largest file, per-extension breakdown
//! - find file: report every file with a given name
//! - find word: count substring occurrences in every file
//! - prune: delete empty files, then directories left empty, bottom-up
//!
//! Failures on individual entries below the root never abort a walk.

mod config;
mod output;
mod prune;
mod search;
mod traversal;
mod walker;

pub use config::WalkerConfig;
pub use output::{RemovedKind, WalkEvent, WalkOutput};
pub use search::count_occurrences;
pub use walker::TreeWalker;
