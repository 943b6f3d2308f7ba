//! pfind - Parallel Filesystem Name Search
//!
//! Searches one or more directory trees in parallel for entries whose
//! basename equals a target name, optionally restricted to a single entry
//! type, printing one matching path per line.
//!
//! # Features
//!
//! - **Dynamic work distribution**: scanning a directory produces the next
//!   directories to scan, so the work queue grows while it drains. Any
//!   worker picks up any directory; no tree partitioning up front.
//!
//! - **Safe termination**: the pool stops exactly when no directory is
//!   queued and no scan is in flight anywhere - never earlier, even when a
//!   worker observing an empty queue races another worker about to push.
//!
//! - **Fault-tolerant traversal**: unreadable directories are counted and
//!   skipped without stopping the run; the aggregate count becomes the
//!   process exit code.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Worker Threads                       │
//! │  ┌─────────┐  ┌─────────┐  ┌─────────┐    ┌─────────┐    │
//! │  │Worker 0 │  │Worker 1 │  │Worker 2 │ .. │Worker N │    │
//! │  │(caller) │  │         │  │         │    │         │    │
//! │  └────┬────┘  └────┬────┘  └────┬────┘    └────┬────┘    │
//! │       │            │            │               │        │
//! │       └──── pop dir / push subdirs ─────────────┘        │
//! │                         │                                │
//! │                         ▼                                │
//! │          ┌────────────────────────────┐                  │
//! │          │        Work Queue          │                  │
//! │          │  pending dirs + in-flight  │                  │
//! │          │  count, condvar wakeups    │                  │
//! │          └────────────────────────────┘                  │
//! │                         │                                │
//! │                 matched paths                            │
//! │                         ▼                                │
//! │          ┌────────────────────────────┐                  │
//! │          │       Match Writer         │                  │
//! │          │  one thread, one line per  │                  │
//! │          │  match, stdout             │                  │
//! │          └────────────────────────────┘                  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```bash
//! # Find every passwd under /etc
//! pfind /etc passwd
//!
//! # Directories named lib under two trees, eight workers
//! pfind -t d -p 8 /usr /opt lib
//! ```

pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod walker;

pub use config::{CliArgs, SearchConfig, TypeFilter};
pub use error::{FindError, Result};
pub use walker::{SearchCoordinator, SearchResult};
