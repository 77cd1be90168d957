//! Error taxonomy for a bundle run.
//!
//! Every variant is terminal for the current run and carries the path (or pattern) that
//! caused it so the invoker can report it verbatim.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type BundleResult<T> = Result<T, BundleError>;

/// Failures that abort a bundle run.
#[derive(Debug, Error)]
pub enum BundleError {
  /// A glob pattern could not be compiled or its directory walk failed.
  #[error("failed to resolve pattern `{pattern}`: {reason}")]
  PatternResolution {
    /// Pattern as written in the source list.
    pattern: String,
    /// Human readable cause reported by the glob engine or the walker.
    reason: String,
  },

  /// A resolved source file could not be read.
  #[error("failed to read {}", path.display())]
  FileRead {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },

  /// The destination directory or file could not be created or replaced.
  #[error("failed to write {}", path.display())]
  FileWrite {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    #[source]
    source: io::Error,
  },

  /// The bundle configuration could not be loaded or names an unknown task.
  #[error("invalid configuration {}: {reason}", path.display())]
  Config {
    /// Configuration file the problem relates to.
    path: PathBuf,
    /// What went wrong.
    reason: String,
  },
}

impl BundleError {
  /// Path (or pattern) named by the error, used when reporting failures.
  pub fn subject(&self) -> String {
    match self {
      Self::PatternResolution { pattern, .. } => pattern.clone(),
      Self::FileRead { path, .. } | Self::FileWrite { path, .. } | Self::Config { path, .. } => {
        path.display().to_string()
      }
    }
  }
}
