//! Search coordinator - orchestrates the parallel traversal
//!
//! The coordinator is responsible for:
//! - Validating and seeding the start paths
//! - Spawning the worker pool (N-1 threads; the calling thread runs the
//!   remaining worker itself)
//! - Joining all workers and the match writer
//! - Final statistics

use crate::config::SearchConfig;
use crate::error::{ConfigError, Result, WorkerError};
use crate::matcher::Matcher;
use crate::report::MatchWriter;
use crate::walker::queue::WorkQueue;
use crate::walker::worker::{worker_loop, SearchStats, Worker};
use std::fs;
use std::io::Write;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{info, warn};

/// Result of a completed search
#[derive(Debug)]
pub struct SearchResult {
    /// Directories scanned to completion
    pub dirs_scanned: u64,

    /// Entries that matched the predicate
    pub matches_found: u64,

    /// Traversal errors encountered
    pub errors: u64,

    /// Directories that vanished before they could be scanned
    pub skipped: u64,

    /// Worker count the search ran with
    pub workers: usize,

    /// Time taken for the search
    pub duration: Duration,
}

impl SearchResult {
    /// Process exit code: the error count, saturated at the exit-status
    /// width. Zero means a clean run; "no matches" is not an error.
    pub fn exit_code(&self) -> u8 {
        self.errors.min(u8::MAX as u64) as u8
    }
}

/// Coordinates the parallel search
pub struct SearchCoordinator {
    /// Configuration
    config: SearchConfig,

    /// Work queue for directory tasks
    queue: Arc<WorkQueue>,

    /// Counters shared by all workers
    stats: Arc<SearchStats>,
}

impl SearchCoordinator {
    /// Create a new search coordinator
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            queue: Arc::new(WorkQueue::new()),
            stats: Arc::new(SearchStats::default()),
        }
    }

    /// Run the search, writing one matched path per line to `out`
    ///
    /// Blocks until the traversal is globally exhausted and every worker
    /// has been joined.
    pub fn run<W: Write + Send + 'static>(self, out: W) -> Result<SearchResult> {
        let start_time = Instant::now();

        let matcher = Arc::new(Matcher::new(
            self.config.name.clone(),
            self.config.type_filter,
        ));

        self.seed()?;

        let writer = MatchWriter::new(out)?;

        info!(
            workers = self.config.worker_count,
            roots = self.config.start_paths.len(),
            name = %matcher.name().to_string_lossy(),
            "Search starting"
        );

        // Spawn N-1 workers; this thread is worker 0
        let mut workers = Vec::with_capacity(self.config.worker_count.saturating_sub(1));
        for id in 1..self.config.worker_count {
            workers.push(Worker::spawn(
                id,
                Arc::clone(&self.queue),
                Arc::clone(&matcher),
                writer.sink(),
                Arc::clone(&self.stats),
            )?);
        }

        let inline_result = worker_loop(0, &self.queue, &matcher, &writer.sink(), &self.stats);

        let mut failure: Option<WorkerError> = None;
        if let Err(e) = inline_result {
            failure.get_or_insert(e);
        }

        for worker in workers {
            let id = worker.id();
            if let Err(e) = worker.join() {
                warn!(worker = id, error = %e, "Worker failed");
                failure.get_or_insert(e);
            }
        }

        // Flush remaining matches even when surfacing a worker failure
        let write_result = writer.finish();
        if let Some(e) = failure {
            return Err(e.into());
        }
        write_result?;

        let duration = start_time.elapsed();
        let result = SearchResult {
            dirs_scanned: self.stats.dirs_scanned.load(Ordering::Relaxed),
            matches_found: self.stats.matches_found.load(Ordering::Relaxed),
            errors: self.stats.errors.load(Ordering::Relaxed),
            skipped: self.stats.skipped.load(Ordering::Relaxed),
            workers: self.config.worker_count,
            duration,
        };

        info!(
            dirs = result.dirs_scanned,
            matches = result.matches_found,
            errors = result.errors,
            duration_ms = duration.as_millis() as u64,
            "Search finished"
        );

        Ok(result)
    }

    /// Validate the start paths and enqueue them
    ///
    /// Each start path must exist; a start path that is itself a symlink
    /// is enqueued verbatim (opening it for the scan follows the link).
    fn seed(&self) -> Result<()> {
        for path in &self.config.start_paths {
            fs::symlink_metadata(path).map_err(|e| ConfigError::StartPathNotFound {
                path: path.clone(),
                reason: e.to_string(),
            })?;

            self.queue.push(path.clone())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TypeFilter;
    use crate::error::FindError;
    use std::ffi::OsString;
    use std::io;
    use std::path::PathBuf;

    fn test_config(start: PathBuf, name: &str, workers: usize) -> SearchConfig {
        SearchConfig {
            start_paths: vec![start],
            name: OsString::from(name),
            type_filter: TypeFilter::Any,
            worker_count: workers,
            verbose: false,
            show_summary: false,
        }
    }

    #[test]
    fn test_missing_start_path_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().join("missing"), "x", 1);

        let err = SearchCoordinator::new(config).run(io::sink()).unwrap_err();
        assert!(matches!(
            err,
            FindError::Config(ConfigError::StartPathNotFound { .. })
        ));
    }

    #[test]
    fn test_empty_directory_runs_clean() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path().to_path_buf(), "anything", 4);

        let result = SearchCoordinator::new(config).run(io::sink()).unwrap();
        assert_eq!(result.dirs_scanned, 1);
        assert_eq!(result.matches_found, 0);
        assert_eq!(result.errors, 0);
        assert_eq!(result.exit_code(), 0);
    }

    #[test]
    fn test_exit_code_saturates() {
        let result = SearchResult {
            dirs_scanned: 0,
            matches_found: 0,
            errors: 10_000,
            skipped: 0,
            workers: 1,
            duration: Duration::from_secs(1),
        };
        assert_eq!(result.exit_code(), 255);

        let result = SearchResult {
            errors: 3,
            ..result
        };
        assert_eq!(result.exit_code(), 3);
    }
}
