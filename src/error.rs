//! Errors surfaced by tree walks
//!
//! Only problems with the walk root (and a failing output sink) reach the
//! caller. Failures on entries below the root are recovered inside the walk.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a walk before or while it runs.
#[derive(Error, Debug)]
pub enum WalkError {
    #[error("invalid directory: '{}'", path.display())]
    InvalidPath { path: PathBuf },

    /// The root exists but cannot be listed. Permission problems and any
    /// other I/O failure on the root both land here, so a root has exactly
    /// two ways to be rejected.
    #[error("cannot read '{}': {source}", path.display())]
    AccessDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Result type for walk operations
pub type Result<T> = std::result::Result<T, WalkError>;
