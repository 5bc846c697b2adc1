//! Treestat - directory statistics, file search and empty-entry pruning

pub mod error;
pub mod output;
pub mod stats;
pub mod tree;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::{Result, WalkError};
pub use output::{
    ConsoleOutput, OutputConfig, format_bytes, format_number, print_report, print_stats_json,
};
pub use stats::{DirectoryStats, ExtensionSize, NO_EXTENSION, extension_of};
pub use tree::{RemovedKind, TreeWalker, WalkEvent, WalkOutput, WalkerConfig, count_occurrences};
