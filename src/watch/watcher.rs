// src/watch/watcher.rs

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::types::Event;
use crate::watch::diff::DiffEngine;
use crate::watch::path_utils::absolutize;
use crate::watch::resolver::{resolve, TargetSet};

/// Poll-based watcher over a fixed set of watch and ignore patterns.
///
/// Each scan re-resolves every pattern against the filesystem and diffs the
/// result with the previous scan. Scans must not run concurrently with each
/// other; the caller owns pacing.
pub struct Watcher {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    watches: Vec<String>,
    ignores: Vec<String>,
    diff: DiffEngine,
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("root", &self.root)
            .field("watches", &self.watches)
            .field("ignores", &self.ignores)
            .field("seeded", &self.diff.is_seeded())
            .finish_non_exhaustive()
    }
}

impl Watcher {
    /// Watcher on the real filesystem rooted at `root`.
    pub fn with_root(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_fs(Arc::new(RealFileSystem), root)
    }

    /// Watcher over an arbitrary filesystem. A relative `root` is taken
    /// relative to the filesystem's current directory.
    pub fn with_fs(fs: Arc<dyn FileSystem>, root: impl AsRef<Path>) -> Result<Self> {
        let cwd = fs.current_dir()?;
        let root = absolutize(&cwd, root.as_ref());
        Ok(Self {
            fs,
            root,
            watches: Vec::new(),
            ignores: Vec::new(),
            diff: DiffEngine::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Add a file, directory or glob to the watch list.
    pub fn watch(&mut self, pattern: impl Into<String>) {
        self.watches.push(pattern.into());
    }

    /// Add a file, directory or glob to the ignore list.
    pub fn ignore(&mut self, pattern: impl Into<String>) {
        self.ignores.push(pattern.into());
    }

    pub fn watches(&self) -> &[String] {
        &self.watches
    }

    pub fn ignores(&self) -> &[String] {
        &self.ignores
    }

    /// Resolve the current targets without touching the baseline.
    pub fn targets(&self) -> Result<TargetSet> {
        resolve(self.fs.as_ref(), &self.root, &self.watches, &self.ignores)
    }

    /// Events since the previous scan. The first scan returns nothing and
    /// records the baseline. On error the baseline is left as it was.
    pub fn scan_for_events(&mut self) -> Result<Vec<Event>> {
        let latest = self.targets()?;
        let events = self.diff.diff(latest);
        debug!(events = events.len(), "scan complete");
        Ok(events)
    }

    /// Whether anything changed since the previous scan.
    pub fn scan_for_change(&mut self) -> Result<bool> {
        let latest = self.targets()?;
        Ok(self.diff.has_changed(latest))
    }

    /// Number of targets currently resolved.
    pub fn target_count(&self) -> Result<usize> {
        Ok(self.targets()?.len())
    }

    /// Number of targets recorded by the last successful scan.
    pub fn tracked_count(&self) -> usize {
        self.diff.baseline().map_or(0, |b| b.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::mock::MockFileSystem;
    use crate::types::EventKind;

    fn watcher(fs: &MockFileSystem) -> Watcher {
        let mut w = Watcher::with_fs(Arc::new(fs.clone()), "/p").unwrap();
        w.watch("src/**/*.go");
        w.ignore("src/vendor");
        w
    }

    #[test]
    fn end_to_end_cycle() {
        let fs = MockFileSystem::new();
        fs.add_dir("/p/src");
        let mut w = watcher(&fs);

        assert!(w.scan_for_events().unwrap().is_empty());

        fs.add_file("/p/src/vendor/x.go");
        assert!(w.scan_for_events().unwrap().is_empty());

        fs.add_file("/p/src/main.go");
        let events = w.scan_for_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Added);
        assert_eq!(events[0].path(), "src/main.go");
        assert!(!events[0].is_dir());

        fs.touch("/p/src/main.go");
        let events = w.scan_for_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Changed);

        fs.remove("/p/src/main.go");
        let events = w.scan_for_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Removed);
        assert_eq!(events[0].path(), "src/main.go");
    }

    #[test]
    fn failed_scan_keeps_baseline() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/src/a/lib.go");
        let mut w = watcher(&fs);
        w.scan_for_events().unwrap();

        fs.deny_read("/p/src/a");
        assert!(w.scan_for_events().is_err());
        assert!(w.scan_for_change().is_err());

        // The failed cycles did not replace the baseline.
        fs.allow_read("/p/src/a");
        assert!(w.scan_for_events().unwrap().is_empty());
        fs.add_file("/p/src/a/new.go");
        assert!(w.scan_for_change().unwrap());
    }

    #[test]
    fn unstattable_entries_fail_the_scan_without_removals() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/src/a/lib.go");
        fs.add_file("/p/src/main.go");
        let mut w = watcher(&fs);
        w.scan_for_events().unwrap();

        fs.deny_search("/p/src/a");
        assert!(w.scan_for_events().is_err());
        assert_eq!(w.tracked_count(), 2);

        fs.allow_search("/p/src/a");
        assert!(w.scan_for_events().unwrap().is_empty());
    }

    #[test]
    fn target_count_does_not_consume_baseline() {
        let fs = MockFileSystem::new();
        fs.add_file("/p/src/main.go");
        let mut w = watcher(&fs);
        w.scan_for_events().unwrap();

        fs.add_file("/p/src/other.go");
        assert_eq!(w.target_count().unwrap(), 2);
        assert_eq!(w.tracked_count(), 1);
        let events = w.scan_for_events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, EventKind::Added);
    }

    #[test]
    fn relative_root_uses_filesystem_cwd() {
        let fs = MockFileSystem::new();
        let w = Watcher::with_fs(Arc::new(fs), "p/./q/..").unwrap();
        assert_eq!(w.root(), Path::new("/p"));
    }
}
