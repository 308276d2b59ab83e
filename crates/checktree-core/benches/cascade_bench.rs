//! Benchmark: cascade cost versus subtree size.
//!
//! Run with: `cargo bench -p checktree-core --bench cascade_bench`
//!
//! Toggling a single leaf of a wide forest should cost the same regardless
//! of how many siblings it has; toggling the root scales with the forest.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use checktree_core::{Forest, Node, StateMapping, export_snapshot};

fn wide_forest(width: usize) -> Forest {
    Forest::new(vec![
        Node::new("root").with_children((0..width).map(|i| Node::new(format!("n{i}"))).collect()),
    ])
}

fn deep_forest(depth: usize) -> Forest {
    let mut node = Node::new("leaf");
    for level in 0..depth {
        node = Node::new(format!("d{level}")).child(node);
    }
    Forest::new(vec![node])
}

// ===========================================================================
// Cascade
// ===========================================================================

fn bench_cascade_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_wide");

    for width in [100usize, 1_000, 10_000] {
        let state = StateMapping::build(&wide_forest(width));
        let leaf = format!("0/2.{}#n{}", width / 2, width / 2);

        group.bench_with_input(BenchmarkId::new("leaf", width), &width, |b, _| {
            b.iter(|| black_box(state.set_subtree(black_box(&leaf), true)));
        });
        group.bench_with_input(BenchmarkId::new("root", width), &width, |b, _| {
            b.iter(|| black_box(state.set_subtree(black_box("1.0#root"), true)));
        });
    }

    group.finish();
}

fn bench_cascade_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade_deep");

    for depth in [100usize, 1_000] {
        let state = StateMapping::build(&deep_forest(depth));
        let root = format!("1.0#d{}", depth - 1);

        group.bench_with_input(BenchmarkId::new("root", depth), &depth, |b, _| {
            b.iter(|| black_box(state.set_subtree(black_box(&root), true)));
        });
    }

    group.finish();
}

// ===========================================================================
// Build + export
// ===========================================================================

fn bench_build_and_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_export");
    let forest = wide_forest(10_000);

    group.bench_function("build/10000", |b| {
        b.iter(|| black_box(StateMapping::build(black_box(&forest))));
    });

    let state = StateMapping::build(&forest).set_subtree("1.0#root", true);
    group.bench_function("export/10000", |b| {
        b.iter(|| black_box(export_snapshot(black_box(&forest), black_box(&state))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cascade_wide,
    bench_cascade_deep,
    bench_build_and_export
);
criterion_main!(benches);
