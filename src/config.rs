//! Configuration types for pfind
//!
//! This module defines:
//! - CLI argument parsing using clap derive macros
//! - Runtime configuration with validation
//!
//! The command line follows the classic find-style argv convention: every
//! positional argument except the last is a start directory, the last one
//! is the name to search for.

use crate::error::ConfigError;
use crate::matcher::EntryKind;
use clap::{Parser, ValueEnum};
use std::ffi::OsString;
use std::path::PathBuf;

/// Maximum reasonable worker count
const MAX_WORKERS: usize = 512;

/// Parallel filesystem name search
#[derive(Parser, Debug, Clone)]
#[command(
    name = "pfind",
    version,
    about = "Parallel filesystem name search",
    long_about = "Searches one or more directory trees in parallel for entries whose \
                  basename equals NAME, printing one matching path per line.\n\n\
                  Directories are distributed across worker threads through a shared \
                  work queue; the traversal order is unspecified.",
    after_help = "EXAMPLES:\n    \
        pfind /etc passwd\n    \
        pfind -t d /usr /opt lib\n    \
        pfind -t l -p 8 / libc.so.6\n    \
        pfind -p 16 --summary /home .bashrc"
)]
pub struct CliArgs {
    /// Start directories followed by the name to search for
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<String>,

    /// Restrict matches to one entry type: f (file), d (directory), l (symlink)
    #[arg(short = 't', long = "type", value_enum, value_name = "TYPE")]
    pub entry_type: Option<TypeFilter>,

    /// Number of worker threads
    #[arg(short = 'p', long = "parallel", default_value_t = 1, value_name = "NUM")]
    pub parallel: usize,

    /// Verbose output (per-directory diagnostics to stderr)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Print a run summary to stderr when the search finishes
    #[arg(long)]
    pub summary: bool,
}

/// Which entry kinds count as matches
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeFilter {
    /// Regular files
    #[value(name = "f")]
    File,

    /// Directories
    #[value(name = "d")]
    Directory,

    /// Symbolic links
    #[value(name = "l")]
    Symlink,

    /// No restriction (default when -t is not given)
    #[value(skip)]
    Any,
}

impl TypeFilter {
    /// Test whether an entry kind passes this filter
    pub fn accepts(self, kind: EntryKind) -> bool {
        match self {
            TypeFilter::Any => true,
            TypeFilter::File => kind == EntryKind::File,
            TypeFilter::Directory => kind == EntryKind::Directory,
            TypeFilter::Symlink => kind == EntryKind::Symlink,
        }
    }
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Traversal roots, in argument order
    pub start_paths: Vec<PathBuf>,

    /// Basename to search for
    pub name: OsString,

    /// Type restriction on matches
    pub type_filter: TypeFilter,

    /// Number of worker threads
    pub worker_count: usize,

    /// Verbose logging
    pub verbose: bool,

    /// Print a run summary to stderr
    pub show_summary: bool,
}

impl SearchConfig {
    /// Create and validate configuration from CLI arguments
    pub fn from_args(args: CliArgs) -> Result<Self, ConfigError> {
        let mut paths = args.paths;

        // Last positional is the search name, the rest are start dirs
        let name = paths.pop().ok_or(ConfigError::MissingName)?;
        if name.is_empty() {
            return Err(ConfigError::MissingName);
        }
        if paths.is_empty() {
            return Err(ConfigError::MissingStartDir);
        }

        if args.parallel == 0 || args.parallel > MAX_WORKERS {
            return Err(ConfigError::InvalidWorkerCount {
                count: args.parallel,
                max: MAX_WORKERS,
            });
        }

        Ok(Self {
            start_paths: paths.into_iter().map(PathBuf::from).collect(),
            name: OsString::from(name),
            type_filter: args.entry_type.unwrap_or(TypeFilter::Any),
            worker_count: args.parallel,
            verbose: args.verbose,
            show_summary: args.summary,
        })
    }
}
