// src/watch/diff.rs

//! Change detection between consecutive scans.
//!
//! Two targets are considered the same when their modification times are
//! equal. Contents are never hashed, so a rewrite that keeps the timestamp
//! (coarse filesystem clocks, tools that preserve mtimes) goes unnoticed.

use crate::types::{Event, EventKind};
use crate::watch::resolver::TargetSet;

/// Holds the previous scan's targets and diffs new scans against them.
///
/// The first scan only seeds the baseline and reports nothing. Afterwards,
/// every scan replaces the baseline wholesale with the latest target set.
#[derive(Debug, Default)]
pub struct DiffEngine {
    baseline: Option<TargetSet>,
}

impl DiffEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_seeded(&self) -> bool {
        self.baseline.is_some()
    }

    pub fn baseline(&self) -> Option<&TargetSet> {
        self.baseline.as_ref()
    }

    /// Compute the events between the baseline and `latest`, then make
    /// `latest` the new baseline.
    pub fn diff(&mut self, latest: TargetSet) -> Vec<Event> {
        let Some(mut previous) = self.baseline.take() else {
            self.baseline = Some(latest);
            return Vec::new();
        };

        let mut events = Vec::new();
        for (path, target) in &latest {
            match previous.remove(path) {
                None => events.push(Event::new(EventKind::Added, target.clone())),
                Some(prev) if prev.modified() != target.modified() => {
                    events.push(Event::new(EventKind::Changed, target.clone()))
                }
                Some(_) => {}
            }
        }
        events.extend(
            previous
                .into_values()
                .map(|target| Event::new(EventKind::Removed, target)),
        );

        self.baseline = Some(latest);
        events
    }

    /// Same semantics as [`diff`](Self::diff), but stops at the first
    /// difference instead of collecting events.
    pub fn has_changed(&mut self, latest: TargetSet) -> bool {
        let changed = match &self.baseline {
            None => false,
            Some(previous) => {
                previous.len() != latest.len()
                    || latest.iter().any(|(path, target)| {
                        previous
                            .get(path)
                            .is_none_or(|prev| prev.modified() != target.modified())
                    })
            }
        };
        self.baseline = Some(latest);
        changed
    }
}
