// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use inertia_blocking::BlockingElements;
use inertia_blocking::adapters::tree::deliver_mutations;
use inertia_tree::{LocalNode, NodeId, Tree};

/// A document whose root has `width` children, each with `width` children.
/// Returns the tree and the grandchildren.
fn wide_tree(width: usize) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::new();
    let body = tree.document();
    let mut leaves = Vec::with_capacity(width * width);
    for _ in 0..width {
        let section = tree.insert(Some(body), LocalNode::element("section"));
        for _ in 0..width {
            leaves.push(tree.insert(Some(section), LocalNode::element("div")));
        }
    }
    (tree, leaves)
}

/// A chain `depth` levels deep where every level also has `fanout - 1` siblings.
/// Returns the tree and the chain from the outermost level inwards.
fn deep_tree(depth: usize, fanout: usize) -> (Tree, Vec<NodeId>) {
    let mut tree = Tree::new();
    let mut parent = tree.document();
    let mut chain = Vec::with_capacity(depth);
    for _ in 0..depth {
        let next = tree.insert(Some(parent), LocalNode::element("div"));
        for _ in 1..fanout {
            tree.insert(Some(parent), LocalNode::element("div"));
        }
        chain.push(next);
        parent = next;
    }
    (tree, chain)
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide");
    for &width in &[8usize, 32, 64] {
        group.throughput(Throughput::Elements((width * width) as u64));
        group.bench_function(format!("push_pop_first_n{}", width), |b| {
            b.iter_batched(
                || wide_tree(width),
                |(mut tree, leaves)| {
                    let mut blocking = BlockingElements::new();
                    blocking.push(&mut tree, leaves[0]).unwrap();
                    black_box(blocking.pop(&mut tree));
                },
                BatchSize::SmallInput,
            )
        });
        // Consecutive pushes alternate between sibling subtrees, which hands
        // tracking over at the divergence instead of rebuilding it.
        group.bench_function(format!("push_sweep_n{}", width), |b| {
            b.iter_batched(
                || wide_tree(width),
                |(mut tree, leaves)| {
                    let mut blocking = BlockingElements::new();
                    for leaf in leaves.iter().step_by(width.max(1) / 4 + 1) {
                        blocking.push(&mut tree, *leaf).unwrap();
                    }
                    blocking.teardown(&mut tree);
                    black_box(tree);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_deep(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep");
    for &depth in &[16usize, 64, 256] {
        group.throughput(Throughput::Elements(depth as u64));
        group.bench_function(format!("push_innermost_d{}", depth), |b| {
            b.iter_batched(
                || deep_tree(depth, 4),
                |(mut tree, chain)| {
                    let mut blocking = BlockingElements::new();
                    blocking.push(&mut tree, chain[chain.len() - 1]).unwrap();
                    black_box(&blocking);
                    blocking.teardown(&mut tree);
                },
                BatchSize::SmallInput,
            )
        });
        group.bench_function(format!("nested_stack_d{}", depth), |b| {
            b.iter_batched(
                || deep_tree(depth, 4),
                |(mut tree, chain)| {
                    let mut blocking = BlockingElements::new();
                    for node in &chain {
                        blocking.push(&mut tree, *node).unwrap();
                    }
                    while blocking.pop(&mut tree).is_some() {}
                    black_box(tree);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_mutations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutations");
    for &count in &[16usize, 256] {
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("deliver_added_siblings_n{}", count), |b| {
            b.iter_batched(
                || {
                    let (mut tree, leaves) = wide_tree(8);
                    let mut blocking = BlockingElements::new();
                    blocking.push(&mut tree, leaves[0]).unwrap();
                    (tree, blocking)
                },
                |(mut tree, mut blocking)| {
                    let body = tree.document();
                    for _ in 0..count {
                        tree.insert(Some(body), LocalNode::element("div"));
                    }
                    deliver_mutations(&mut tree, &mut blocking);
                    black_box(blocking.len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wide, bench_deep, bench_mutations);
criterion_main!(benches);
