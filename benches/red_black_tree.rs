use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use redblack_collections::red_black_tree::RedBlackTree;
use std::collections::BTreeSet;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_btreeset_insert(c: &mut Criterion) {
    c.bench_function("bench btreeset insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut set = BTreeSet::new();
            for _ in 0..NUM_OF_OPERATIONS {
                set.insert(rng.gen::<i32>());
            }
        })
    });
}

fn bench_red_black_tree_insert(c: &mut Criterion) {
    c.bench_function("bench red_black_tree insert", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut tree = RedBlackTree::new();
            for _ in 0..NUM_OF_OPERATIONS {
                tree.insert(rng.gen::<i32>());
            }
        })
    });
}

fn bench_red_black_tree_find(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut tree = RedBlackTree::new();
    let mut keys = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen::<i32>();
        tree.insert(key);
        keys.push(key);
    }

    c.bench_function("bench red_black_tree find", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(tree.find(*key));
            }
        })
    });
}

fn bench_red_black_tree_delete(c: &mut Criterion) {
    c.bench_function("bench red_black_tree delete", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut tree = RedBlackTree::new();
            let mut keys = Vec::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.gen::<i32>();
                tree.insert(key);
                keys.push(key);
            }
            for key in &keys {
                black_box(tree.delete(*key));
            }
        })
    });
}

criterion_group!(
    benches,
    bench_btreeset_insert,
    bench_red_black_tree_insert,
    bench_red_black_tree_find,
    bench_red_black_tree_delete,
);
criterion_main!(benches);
