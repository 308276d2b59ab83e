#![no_main]

use checktree_core::{ExportFormat, Forest, StateMapping, export_snapshot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either fail to parse or survive the whole
    // build -> cascade -> export pipeline.
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(forest) = Forest::from_json(text) else {
        return;
    };

    let state = StateMapping::build(&forest);
    assert_eq!(state.len(), forest.node_count(), "one entry per node");
    assert_eq!(state.checked_count(), 0, "build starts unchecked");

    let mut keys: Vec<_> = state.keys().cloned().collect();
    keys.sort();
    let Some(target) = keys.first() else {
        return;
    };

    let cascade = state.cascade(target.as_str(), true);
    assert!(cascade.touched >= 1, "known key touches itself");
    assert_eq!(cascade.changed, cascade.touched, "every node flipped");
    assert_eq!(cascade.state.len(), state.len(), "key set is stable");

    let snapshot = export_snapshot(&forest, &cascade.state);
    assert_eq!(snapshot.checked_count(), cascade.touched);
    let json = snapshot.to_json(ExportFormat::Compact).expect("snapshot encodes");
    assert!(json.starts_with('['));
});
