//! Entry classification and the search predicate
//!
//! Classification uses the metadata already carried by a directory entry
//! (lstat semantics): a symbolic link is reported as a symlink, never as
//! the thing it points to.

use crate::config::TypeFilter;
use std::ffi::{OsStr, OsString};
use std::fs::FileType;

/// The kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Regular file
    File,

    /// Directory
    Directory,

    /// Symbolic link (not followed for classification)
    Symlink,

    /// Anything else (fifo, socket, device, ...)
    Other,
}

impl EntryKind {
    /// Classify from a `std::fs::FileType`
    pub fn from_file_type(file_type: FileType) -> Self {
        if file_type.is_symlink() {
            EntryKind::Symlink
        } else if file_type.is_dir() {
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File
        } else {
            EntryKind::Other
        }
    }

    /// Returns true for directories
    pub fn is_dir(self) -> bool {
        self == EntryKind::Directory
    }
}

/// The search predicate: target basename plus type filter
///
/// Immutable once built; shared read-only across all workers.
#[derive(Debug, Clone)]
pub struct Matcher {
    /// Basename to match exactly
    name: OsString,

    /// Which entry kinds count as matches
    filter: TypeFilter,
}

impl Matcher {
    /// Create a new matcher
    pub fn new(name: impl Into<OsString>, filter: TypeFilter) -> Self {
        Self {
            name: name.into(),
            filter,
        }
    }

    /// Test an entry against the predicate
    pub fn matches(&self, name: &OsStr, kind: EntryKind) -> bool {
        self.filter.accepts(kind) && name == self.name
    }

    /// The target basename
    pub fn name(&self) -> &OsStr {
        &self.name
    }
}
