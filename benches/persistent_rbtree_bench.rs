//! Benchmark for PersistentRbTree vs standard BTreeSet and HashSet.
//!
//! Every benchmark works on the same shuffled integer keys so the tree is
//! built in a realistic, unsorted order.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use persistent_rbtree::persistent::PersistentRbTree;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{BTreeSet, HashSet};
use std::hint::black_box;

const SIZES: [usize; 4] = [10, 100, 1000, 10000];

fn shuffled_keys(size: usize) -> Vec<usize> {
    let mut keys: Vec<usize> = (0..size).collect();
    keys.shuffle(&mut StdRng::seed_from_u64(2017));
    keys
}

// =============================================================================
// empty Benchmark
// =============================================================================

fn benchmark_empty(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("empty");

    group.bench_function("PersistentRbTree", |bencher| {
        bencher.iter(|| black_box(PersistentRbTree::<usize>::new()));
    });

    group.bench_function("BTreeSet", |bencher| {
        bencher.iter(|| black_box(BTreeSet::<usize>::new()));
    });

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in SIZES {
        let keys = shuffled_keys(size);
        let persistent_tree: PersistentRbTree<usize> = keys.iter().copied().collect();
        let btree_set: BTreeSet<usize> = keys.iter().copied().collect();
        let hash_set: HashSet<usize> = keys.iter().copied().collect();

        // PersistentRbTree contains
        group.bench_with_input(
            BenchmarkId::new("PersistentRbTree", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut found = 0;
                    for key in keys {
                        if persistent_tree.contains(black_box(key)) {
                            found += 1;
                        }
                    }
                    black_box(found)
                });
            },
        );

        // Standard BTreeSet contains
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut found = 0;
                for key in keys {
                    if btree_set.contains(black_box(key)) {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });

        // Standard HashSet contains
        group.bench_with_input(BenchmarkId::new("HashSet", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut found = 0;
                for key in keys {
                    if hash_set.contains(black_box(key)) {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });
    }

    group.finish();
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        let keys = shuffled_keys(size);

        // PersistentRbTree insert
        group.bench_with_input(
            BenchmarkId::new("PersistentRbTree", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    let mut tree = PersistentRbTree::new();
                    for &key in keys {
                        tree = tree.insert(black_box(key));
                    }
                    black_box(tree)
                });
            },
        );

        // Standard BTreeSet insert
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut set = BTreeSet::new();
                for &key in keys {
                    set.insert(black_box(key));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in SIZES {
        let keys = shuffled_keys(size);
        let persistent_tree: PersistentRbTree<usize> = keys.iter().copied().collect();
        let btree_set: BTreeSet<usize> = keys.iter().copied().collect();

        // PersistentRbTree remove: every removal derives from the full tree
        group.bench_with_input(
            BenchmarkId::new("PersistentRbTree", size),
            &keys,
            |bencher, keys| {
                bencher.iter(|| {
                    for key in keys {
                        black_box(persistent_tree.remove(black_box(key)));
                    }
                });
            },
        );

        // Standard BTreeSet remove from a fresh clone
        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut set = btree_set.clone();
                for key in keys {
                    set.remove(black_box(key));
                }
                black_box(set)
            });
        });
    }

    group.finish();
}

// =============================================================================
// structural_hash Benchmark
// =============================================================================

fn benchmark_structural_hash(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("structural_hash");

    for size in SIZES {
        let persistent_tree: PersistentRbTree<usize> = shuffled_keys(size).into_iter().collect();

        group.bench_with_input(
            BenchmarkId::new("PersistentRbTree", size),
            &persistent_tree,
            |bencher, tree| {
                bencher.iter(|| black_box(tree.structural_hash()));
            },
        );
    }

    group.finish();
}

// =============================================================================
// Criterion Group and Main
// =============================================================================

criterion_group!(
    benches,
    benchmark_empty,
    benchmark_contains,
    benchmark_insert,
    benchmark_remove,
    benchmark_structural_hash
);

criterion_main!(benches);
