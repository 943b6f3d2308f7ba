//! Shared work queue for directory scan tasks
//!
//! The queue is the single shared mutable resource all workers contend on.
//! It holds the directories still to visit together with the number of
//! scans currently in flight, because the two facts must be observed
//! together: an empty queue alone says nothing while a worker mid-scan can
//! still push children.
//!
//! Completion rule: the queue is exhausted when it is empty AND no scan is
//! in flight. `next_task` blocks on a condvar until either work arrives or
//! that state is reached, so idle workers never spin.

use crate::error::WorkerError;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};

/// Statistics for the work queue
#[derive(Debug, Default)]
pub struct QueueStats {
    /// Total directories enqueued
    pub enqueued: AtomicU64,

    /// Total directories handed to workers
    pub dequeued: AtomicU64,
}

/// Queue contents plus the in-flight scan count, guarded as one unit
struct QueueState {
    /// Directories awaiting a scan, in insertion order
    pending: VecDeque<PathBuf>,

    /// Number of scans currently in flight
    active: usize,
}

/// Work queue distributing directories across the worker pool
pub struct WorkQueue {
    state: Mutex<QueueState>,
    work_ready: Condvar,
    stats: QueueStats,
}

impl WorkQueue {
    /// Create an empty work queue
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                pending: VecDeque::new(),
                active: 0,
            }),
            work_ready: Condvar::new(),
            stats: QueueStats::default(),
        }
    }

    /// Append a directory to the queue and wake one waiting worker
    pub fn push(&self, path: PathBuf) -> Result<(), WorkerError> {
        let mut state = self.state.lock().map_err(|_| WorkerError::QueuePoisoned)?;
        state.pending.push_back(path);
        self.stats.enqueued.fetch_add(1, Ordering::Relaxed);
        self.work_ready.notify_one();
        Ok(())
    }

    /// Claim the next directory to scan
    ///
    /// Blocks while the queue is empty but scans are still in flight
    /// elsewhere. Returns `None` exactly once no queued work remains and no
    /// worker holds a scan - at that point no future work can appear, so
    /// every caller receiving `None` may exit.
    pub fn next_task(&self) -> Result<Option<ScanTask<'_>>, WorkerError> {
        let mut state = self.state.lock().map_err(|_| WorkerError::QueuePoisoned)?;
        loop {
            if let Some(path) = state.pending.pop_front() {
                // Claiming the path and counting the scan must happen in
                // one critical section: a popped-but-uncounted scan would
                // be invisible to the exhaustion check below.
                state.active += 1;
                self.stats.dequeued.fetch_add(1, Ordering::Relaxed);
                return Ok(Some(ScanTask { queue: self, path }));
            }

            if state.active == 0 {
                return Ok(None);
            }

            state = self
                .work_ready
                .wait(state)
                .map_err(|_| WorkerError::QueuePoisoned)?;
        }
    }

    /// Mark one in-flight scan as finished
    ///
    /// Called from `ScanTask::drop`, which may run during a panic unwind;
    /// a poisoned lock is tolerated here so the remaining workers still
    /// get their wakeup.
    fn finish_scan(&self) {
        let mut state = match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        state.active -= 1;
        if state.active == 0 && state.pending.is_empty() {
            self.work_ready.notify_all();
        }
    }

    /// Check if the queue is empty (advisory; see `next_task` for the
    /// authoritative completion rule)
    pub fn is_empty(&self) -> bool {
        self.state
            .lock()
            .map(|state| state.pending.is_empty())
            .unwrap_or(true)
    }

    /// Get current queue length
    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.pending.len()).unwrap_or(0)
    }

    /// Number of scans currently in flight
    pub fn active_scans(&self) -> usize {
        self.state.lock().map(|state| state.active).unwrap_or(0)
    }

    /// Get queue statistics
    pub fn stats(&self) -> &QueueStats {
        &self.stats
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// A claimed directory scan
///
/// Holding a `ScanTask` counts as an in-flight scan; dropping it marks the
/// scan finished and, when it was the last one with nothing queued, wakes
/// every blocked worker so they can observe exhaustion.
pub struct ScanTask<'a> {
    queue: &'a WorkQueue,
    path: PathBuf,
}

impl ScanTask<'_> {
    /// The directory this task scans
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScanTask<'_> {
    fn drop(&mut self) {
        self.queue.finish_scan();
    }
}
