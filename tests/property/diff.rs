use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use pollwatch::fs::FileMeta;
use pollwatch::types::{EventKind, Target};
use pollwatch::watch::{DiffEngine, TargetSet};

// A scan is a map of file name -> mtime seconds over a small name space, so
// successive scans overlap a lot.
fn scan_strategy() -> impl Strategy<Value = BTreeMap<u8, u8>> {
    proptest::collection::btree_map(0u8..12, 0u8..4, 0..10)
}

fn to_targets(scan: &BTreeMap<u8, u8>) -> TargetSet {
    scan.iter()
        .map(|(&name, &secs)| {
            let relative = format!("f{name}");
            let absolute = PathBuf::from("/root").join(&relative);
            let meta = FileMeta {
                modified: Some(SystemTime::UNIX_EPOCH + Duration::from_secs(secs.into())),
                is_dir: false,
                is_symlink: false,
            };
            (absolute.clone(), Target::new(relative, absolute, Some(meta)))
        })
        .collect()
}

proptest! {
    #[test]
    fn events_partition_the_difference(prev in scan_strategy(), next in scan_strategy()) {
        let mut engine = DiffEngine::new();
        prop_assert!(engine.diff(to_targets(&prev)).is_empty());
        let events = engine.diff(to_targets(&next));

        let mut seen = BTreeSet::new();
        for event in &events {
            let name: u8 = event.path()[1..].parse().unwrap();
            prop_assert!(seen.insert(name), "path reported twice: {}", event.path());
            match event.kind {
                EventKind::Added => prop_assert!(!prev.contains_key(&name) && next.contains_key(&name)),
                EventKind::Removed => prop_assert!(prev.contains_key(&name) && !next.contains_key(&name)),
                EventKind::Changed => prop_assert!(
                    prev.contains_key(&name) && next.contains_key(&name) && prev[&name] != next[&name]
                ),
            }
        }

        let expected: BTreeSet<u8> = prev
            .keys()
            .chain(next.keys())
            .copied()
            .filter(|k| prev.get(k) != next.get(k))
            .collect();
        prop_assert_eq!(seen, expected);
        prop_assert_eq!(engine.baseline().map(|b| b.len()), Some(next.len()));
    }

    #[test]
    fn boolean_agrees_with_events(scans in proptest::collection::vec(scan_strategy(), 1..6)) {
        let mut by_events = DiffEngine::new();
        let mut by_flag = DiffEngine::new();
        for scan in &scans {
            let changed = !by_events.diff(to_targets(scan)).is_empty();
            prop_assert_eq!(by_flag.has_changed(to_targets(scan)), changed);
        }
    }
}
