// src/watch/resolver.rs

//! Turns watch / ignore pattern lists into the concrete target set for one
//! scan cycle.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use crate::errors::{PollwatchError, Result};
use crate::fs::FileSystem;
use crate::glob::{glob, is_ignored, IgnoreSet};
use crate::types::Target;
use crate::watch::path_utils::display_path;

/// Resolved targets keyed by normalised absolute path.
pub type TargetSet = BTreeMap<PathBuf, Target>;

/// Expand every ignore pattern (with traversal) into the set of absolute
/// paths to exclude.
pub fn build_ignore_set(fs: &dyn FileSystem, root: &Path, ignores: &[String]) -> Result<IgnoreSet> {
    let empty = IgnoreSet::new();
    let mut set = IgnoreSet::new();
    for pattern in ignores {
        let matches = glob(fs, root, pattern, &empty, true)
            .map_err(|e| PollwatchError::expanding(pattern, e))?;
        trace!(pattern = %pattern, count = matches.len(), "ignore pattern expanded");
        set.extend(matches.into_keys());
    }
    Ok(set)
}

/// Resolve the current target set.
///
/// Watch patterns are expanded with traversal while pruning the ignore set,
/// and results from all patterns are unioned (a later pattern's entry replaces
/// an earlier one for the same path). Entries that vanish mid-scan are simply
/// absent; a directory that cannot be listed fails the whole resolution.
pub fn resolve(
    fs: &dyn FileSystem,
    root: &Path,
    watches: &[String],
    ignores: &[String],
) -> Result<TargetSet> {
    let ignore_set = build_ignore_set(fs, root, ignores)?;

    let mut targets = TargetSet::new();
    for pattern in watches {
        let matches = glob(fs, root, pattern, &ignore_set, true)
            .map_err(|e| PollwatchError::expanding(pattern, e))?;
        for (absolute, meta) in matches {
            if is_ignored(&absolute, &ignore_set) {
                continue;
            }
            let relative = display_path(root, &absolute);
            targets.insert(absolute.clone(), Target::new(relative, absolute, Some(meta)));
        }
    }

    debug!(
        targets = targets.len(),
        ignored = ignore_set.len(),
        "resolved watch targets"
    );
    Ok(targets)
}
