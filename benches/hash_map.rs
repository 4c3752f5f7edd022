use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use redblack_collections::hash_map::HashMap;

const NUM_OF_OPERATIONS: usize = 100;

fn bench_hash_map_put(c: &mut Criterion) {
    c.bench_function("bench hash_map put", |b| {
        b.iter(|| {
            let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
            let mut map = HashMap::new();
            for _ in 0..NUM_OF_OPERATIONS {
                let key = rng.next_u32();
                let val = rng.next_u32();

                let _ = map.put(key, val);
            }
        })
    });
}

fn bench_hash_map_get(c: &mut Criterion) {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = HashMap::new();
    let mut keys = Vec::new();
    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.next_u32();
        let val = rng.next_u32();

        let _ = map.put(key, val);
        keys.push(key);
    }

    c.bench_function("bench hash_map get", move |b| {
        b.iter(|| {
            for key in &keys {
                black_box(map.get(key));
            }
        })
    });
}

criterion_group!(benches, bench_hash_map_get, bench_hash_map_put);
criterion_main!(benches);
