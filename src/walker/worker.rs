//! Worker thread logic for the parallel search
//!
//! Each worker:
//! - Claims directory tasks from the shared work queue
//! - Reads directory contents with lstat-equivalent classification
//! - Reports entries matching the predicate to the match writer
//! - Pushes discovered subdirectories back onto the work queue
//!
//! A worker only exits when the queue reports global exhaustion, or on a
//! fatal queue/channel failure.

use crate::error::{ScanError, ScanOutcome, WorkerError};
use crate::matcher::{EntryKind, Matcher};
use crate::report::MatchSink;
use crate::walker::queue::WorkQueue;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, trace, warn};

/// Counters shared by every worker in a pool
#[derive(Debug, Default)]
pub struct SearchStats {
    /// Directories scanned to completion
    pub dirs_scanned: AtomicU64,

    /// Entries that matched the predicate
    pub matches_found: AtomicU64,

    /// Traversal errors (unreadable directories, failed entries)
    pub errors: AtomicU64,

    /// Directories that vanished between discovery and scan
    pub skipped: AtomicU64,
}

impl SearchStats {
    fn record_dir(&self) {
        self.dirs_scanned.fetch_add(1, Ordering::Relaxed);
    }

    fn record_match(&self) {
        self.matches_found.fetch_add(1, Ordering::Relaxed);
    }

    fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    fn record_skip(&self) {
        self.skipped.fetch_add(1, Ordering::Relaxed);
    }
}

/// A worker thread that processes directory tasks
pub struct Worker {
    /// Worker ID
    id: usize,

    /// Thread handle
    handle: Option<JoinHandle<Result<(), WorkerError>>>,
}

impl Worker {
    /// Spawn a new worker thread
    pub fn spawn(
        id: usize,
        queue: Arc<WorkQueue>,
        matcher: Arc<Matcher>,
        sink: MatchSink,
        stats: Arc<SearchStats>,
    ) -> Result<Self, WorkerError> {
        let handle = thread::Builder::new()
            .name(format!("finder-{}", id))
            .spawn(move || worker_loop(id, &queue, &matcher, &sink, &stats))
            .map_err(|e| WorkerError::SpawnFailed {
                id,
                reason: e.to_string(),
            })?;

        Ok(Self {
            id,
            handle: Some(handle),
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Wait for the worker to finish
    pub fn join(mut self) -> Result<(), WorkerError> {
        if let Some(handle) = self.handle.take() {
            match handle.join() {
                Ok(result) => result,
                Err(_) => Err(WorkerError::Panicked { id: self.id }),
            }
        } else {
            Ok(())
        }
    }
}

/// Main worker loop
///
/// Also run directly on the calling thread for worker 0.
pub fn worker_loop(
    id: usize,
    queue: &WorkQueue,
    matcher: &Matcher,
    sink: &MatchSink,
    stats: &SearchStats,
) -> Result<(), WorkerError> {
    debug!(worker = id, "Worker starting");

    while let Some(task) = queue.next_task()? {
        let outcome = scan_directory(task.path(), queue, matcher, sink, stats)?;

        match &outcome {
            ScanOutcome::Scanned {
                entries, subdirs, ..
            } => {
                trace!(
                    worker = id,
                    path = %task.path().display(),
                    entries = entries,
                    subdirs = subdirs,
                    "Directory scanned"
                );
            }
            ScanOutcome::Skipped { path } => {
                debug!(worker = id, path = %path.display(), "Directory vanished, skipped");
            }
            ScanOutcome::Failed { path, error } => {
                warn!(worker = id, path = %path.display(), error = %error, "Directory failed");
            }
        }
        // task drops here, after any children were pushed
    }

    debug!(worker = id, "Worker finished");
    Ok(())
}

/// Scan a single directory
///
/// The `Err` branch is reserved for fatal queue/channel failures; every
/// filesystem-level problem is folded into the returned outcome and the
/// shared counters.
fn scan_directory(
    path: &Path,
    queue: &WorkQueue,
    matcher: &Matcher,
    sink: &MatchSink,
    stats: &SearchStats,
) -> Result<ScanOutcome, WorkerError> {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            stats.record_skip();
            return Ok(ScanOutcome::Skipped {
                path: path.to_owned(),
            });
        }
        Err(err) => {
            stats.record_error();
            return Ok(ScanOutcome::Failed {
                path: path.to_owned(),
                error: ScanError::ReadDirFailed {
                    path: path.to_owned(),
                    source: err,
                },
            });
        }
    };

    let mut entry_count = 0;
    let mut subdir_count = 0;

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                stats.record_error();
                let error = ScanError::EntryFailed {
                    path: path.to_owned(),
                    source: err,
                };
                warn!(path = %path.display(), error = %error, "Entry unreadable");
                continue;
            }
        };

        entry_count += 1;

        // file_type() classifies the entry itself - a symlink stays a
        // symlink, whatever it points to
        let kind = match entry.file_type() {
            Ok(file_type) => EntryKind::from_file_type(file_type),
            Err(err) if err.kind() == io::ErrorKind::NotFound => continue,
            Err(err) => {
                stats.record_error();
                warn!(path = %entry.path().display(), error = %err, "Entry classification failed");
                continue;
            }
        };

        if matcher.matches(&entry.file_name(), kind) {
            stats.record_match();
            sink.send(entry.path())?;
        }

        // Directories are always traversed, matched or not
        if kind.is_dir() {
            subdir_count += 1;
            queue.push(entry.path())?;
        }
    }

    stats.record_dir();

    Ok(ScanOutcome::Scanned {
        path: path.to_owned(),
        entries: entry_count,
        subdirs: subdir_count,
    })
}
