#![no_main]

use arbitrary::Arbitrary;
use checktree_core::{CheckTree, CheckTreeConfig, Forest, HistoryConfig, Node};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Shape {
    /// Child counts in pre-order; capped to keep forests small.
    fanout: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    Set { pick: u16, value: bool },
    Toggle { pick: u16 },
    SetUnknown { value: bool },
    Undo,
    Redo,
    Reset,
}

#[derive(Debug, Arbitrary)]
struct Input {
    shape: Shape,
    history_depth: u8,
    ops: Vec<Op>,
}

fn build_forest(shape: &Shape) -> Forest {
    let mut fanout = shape.fanout.iter().map(|n| usize::from(n % 4));
    let mut budget = 256usize;
    let roots = (0..fanout.next().unwrap_or(1))
        .map(|i| grow(format!("r{i}"), &mut fanout, &mut budget, 0))
        .collect();
    Forest::new(roots)
}

fn grow(label: String, fanout: &mut impl Iterator<Item = usize>, budget: &mut usize, depth: usize) -> Node {
    *budget = budget.saturating_sub(1);
    let count = if *budget == 0 || depth > 8 { 0 } else { fanout.next().unwrap_or(0) };
    let children = (0..count)
        .map(|i| grow(format!("{label}.{i}"), fanout, budget, depth + 1))
        .collect();
    Node::new(label).with_children(children)
}

fuzz_target!(|input: Input| {
    let forest = build_forest(&input.shape);
    let config = CheckTreeConfig::default()
        .with_history(HistoryConfig::new(usize::from(input.history_depth % 16) + 1));
    let mut tree = CheckTree::with_config(forest, config);

    let mut keys: Vec<_> = tree.state().keys().cloned().collect();
    keys.sort();

    for op in input.ops.iter().take(64) {
        match *op {
            Op::Set { pick, value } if !keys.is_empty() => {
                let key = &keys[usize::from(pick) % keys.len()];
                tree.set(key.as_str(), value);
                assert_eq!(tree.is_checked(key.as_str()), value);
            }
            Op::Toggle { pick } if !keys.is_empty() => {
                let key = &keys[usize::from(pick) % keys.len()];
                let before = tree.is_checked(key.as_str());
                tree.toggle(key.as_str());
                assert_eq!(tree.is_checked(key.as_str()), !before);
            }
            Op::SetUnknown { value } => {
                let before = tree.state();
                assert!(!tree.set("0.0#unknown", value));
                assert!(tree.state().ptr_eq(&before));
            }
            Op::Undo => {
                tree.undo();
            }
            Op::Redo => {
                tree.redo();
            }
            Op::Reset => {
                tree.reset();
                assert_eq!(tree.state().checked_count(), 0);
            }
            _ => {}
        }
        assert_eq!(tree.state().len(), keys.len(), "key set is stable");
        assert_eq!(tree.export().checked_count(), tree.state().checked_count());
    }
});
