//! Error types for pfind
//!
//! This module defines the error hierarchy:
//! - Configuration and CLI errors (fatal, pre-traversal)
//! - Per-directory scan errors (recoverable, counted)
//! - Worker thread errors (fatal to the run)
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include the path that failed
//! - A failed directory never aborts the run; a failed primitive always does

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the pfind application
#[derive(Error, Debug)]
pub enum FindError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Worker/concurrency errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// I/O errors outside the traversal itself
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid worker count
    #[error("Invalid worker count {count}: must be between 1 and {max}")]
    InvalidWorkerCount { count: usize, max: usize },

    /// No start directory given
    #[error("Missing start directory: expected START_DIR... NAME")]
    MissingStartDir,

    /// The trailing name argument is missing or empty
    #[error("Missing or empty search name")]
    MissingName,

    /// A start path does not exist
    #[error("Start path '{}' does not exist: {}", path.display(), reason)]
    StartPathNotFound { path: PathBuf, reason: String },
}

/// Errors encountered while scanning a single directory
///
/// These are recoverable: the directory is skipped, the error is counted,
/// and the run continues.
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failed to open the directory for reading
    #[error("Failed to read directory '{}': {}", path.display(), source)]
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a single entry mid-iteration
    #[error("Failed to read entry in '{}': {}", path.display(), source)]
    EntryFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Worker thread errors
///
/// Any of these ends the run: the pool cannot keep coordinating with a
/// compromised queue or a dead output channel.
#[derive(Error, Debug)]
pub enum WorkerError {
    /// Worker panicked
    #[error("Worker {id} panicked")]
    Panicked { id: usize },

    /// Worker thread could not be spawned
    #[error("Failed to spawn worker {id}: {reason}")]
    SpawnFailed { id: usize, reason: String },

    /// The work queue lock was poisoned by a panicking worker
    #[error("Work queue lock poisoned")]
    QueuePoisoned,

    /// The match channel closed while workers were still running
    #[error("Match channel closed unexpectedly")]
    MatchChannelClosed,
}

/// Result type alias for FindError
pub type Result<T> = std::result::Result<T, FindError>;

/// Represents the outcome of scanning a single directory
#[derive(Debug)]
pub enum ScanOutcome {
    /// Successfully scanned the directory
    Scanned {
        path: PathBuf,
        entries: usize,
        subdirs: usize,
    },

    /// Directory vanished between discovery and scan
    Skipped { path: PathBuf },

    /// Failed with a counted traversal error
    Failed { path: PathBuf, error: ScanError },
}

impl ScanOutcome {
    /// Returns true if this outcome represents a completed scan
    pub fn is_scanned(&self) -> bool {
        matches!(self, ScanOutcome::Scanned { .. })
    }

    /// Returns the path associated with this outcome
    pub fn path(&self) -> &std::path::Path {
        match self {
            ScanOutcome::Scanned { path, .. } => path,
            ScanOutcome::Skipped { path } => path,
            ScanOutcome::Failed { path, .. } => path,
        }
    }
}
