// src/types.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::fs::FileMeta;

/// One watched filesystem entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    /// Path for display: relative to the watch root when the entry lives
    /// under it, absolute otherwise.
    pub relative: String,
    /// Normalised absolute path; the identity of the target across scans.
    pub absolute: PathBuf,
    /// `None` until the entry has been stat'd.
    pub meta: Option<FileMeta>,
}

impl Target {
    pub fn new(relative: impl Into<String>, absolute: impl Into<PathBuf>, meta: Option<FileMeta>) -> Self {
        Self {
            relative: relative.into(),
            absolute: absolute.into(),
            meta,
        }
    }

    pub fn path(&self) -> &str {
        &self.relative
    }

    pub fn absolute(&self) -> &Path {
        &self.absolute
    }

    pub fn modified(&self) -> Option<SystemTime> {
        self.meta.and_then(|m| m.modified)
    }

    pub fn is_dir(&self) -> bool {
        self.meta.is_some_and(|m| m.is_dir)
    }

    pub fn exists(&self) -> bool {
        self.meta.is_some()
    }
}

/// Kind of change detected between two scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventKind {
    Added,
    Changed,
    Removed,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Added => "added",
            EventKind::Changed => "changed",
            EventKind::Removed => "removed",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One detected change. For `Removed`, `target` is the entry as it was last
/// seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    pub target: Target,
}

impl Event {
    pub fn new(kind: EventKind, target: Target) -> Self {
        Self { kind, target }
    }

    pub fn path(&self) -> &str {
        self.target.path()
    }

    pub fn is_dir(&self) -> bool {
        self.target.is_dir()
    }
}
