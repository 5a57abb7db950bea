use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gentree::Tree;

/// Returns how many nodes are needed to fill a binary tree with `num_levels` levels.
fn num_nodes_in_full_tree(num_levels: usize) -> usize {
    2usize.pow(num_levels as u32) - 1
}

/// Builds a tree by inserting values in ascending order. Nothing rebalances, so this is
/// a list hanging off right children.
fn get_unbalanced_tree(num_levels: usize) -> Tree<i32> {
    let mut tree = Tree::new();
    for x in (0..).take(num_nodes_in_full_tree(num_levels)) {
        let _ = tree.insert(x);
    }

    tree
}

/// Builds a tree by inserting values so that, without any self-balancing, the resultant
/// tree is still balanced.
///
/// It ensures there are `num_levels` of nodes, all full.
fn get_balanced_tree(num_levels: usize) -> Tree<i32> {
    let mut tree = Tree::new();
    let xs = (0..)
        .take(num_nodes_in_full_tree(num_levels))
        .collect::<Vec<_>>();
    fill_balanced_tree(&mut tree, &xs);
    tree
}

/// Recursive helper for [`get_balanced_tree`].
fn fill_balanced_tree(tree: &mut Tree<i32>, xs: &[i32]) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        let _ = tree.insert(xs[mid]);
        fill_balanced_tree(tree, &xs[..mid]);
        fill_balanced_tree(tree, &xs[mid + 1..]);
    }
}

/// Helper to bench a function on a tree.
/// It creates a group for the given name and closure and runs it against balanced and
/// unbalanced trees of various sizes before finishing the group. Each iteration gets a
/// freshly built tree so removals and inserts don't accumulate.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Tree<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11] {
        let largest_element_in_tree = num_nodes_in_full_tree(num_levels) as i32 - 1;
        let shapes: [(&str, fn(usize) -> Tree<i32>); 2] = [
            ("unbalanced", get_unbalanced_tree),
            ("balanced", get_balanced_tree),
        ];
        for (shape, build) in shapes {
            let id = BenchmarkId::new(shape, largest_element_in_tree);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut tree = black_box(build(num_levels));
                        let instant = std::time::Instant::now();
                        f(&mut tree, black_box(largest_element_in_tree));
                        time += instant.elapsed();
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "search", |tree, i| {
        let _value = black_box(tree.search(&i));
    });
    bench_helper(c, "remove", |tree, i| {
        let _ = black_box(tree.remove(&i));
    });
    bench_helper(c, "insert", |tree, i| {
        let _ = black_box(tree.insert(i + 1));
    });

    bench_helper(c, "search-miss", |tree, i| {
        let _value = black_box(tree.search(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |tree, i| {
        let _ = black_box(tree.remove(&(i + 1)));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
