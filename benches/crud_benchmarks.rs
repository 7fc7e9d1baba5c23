use bst_map::BstMap;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;

/// Size of the randomly ordered workloads.
const N: usize = 10_000;

/// Sorted input degrades the tree to a chain, making every operation linear.
const SORTED_N: usize = 1_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn reverse_ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).rev().collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert(c: &mut Criterion, name: &str, keys: &[i64]) {
    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("BstMap", keys.len()), |b| {
        b.iter(|| {
            let mut map = BstMap::new();
            for &k in keys {
                map.put(k, k);
            }
            map
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", keys.len()), |b| {
        b.iter(|| {
            let mut map = BTreeMap::new();
            for &k in keys {
                map.insert(k, k);
            }
            map
        });
    });

    group.finish();
}

fn bench_map_insert_ordered(c: &mut Criterion) {
    bench_insert(c, "map_insert_ordered", &ordered_keys(SORTED_N));
}

fn bench_map_insert_reverse(c: &mut Criterion) {
    bench_insert(c, "map_insert_reverse", &reverse_ordered_keys(SORTED_N));
}

fn bench_map_insert_random(c: &mut Criterion) {
    bench_insert(c, "map_insert_random", &random_keys(N));
}

// ─── Get ────────────────────────────────────────────────────────────────────

fn bench_get(c: &mut Criterion, name: &str, keys: &[i64]) {
    let bst_map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("BstMap", keys.len()), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in keys {
                if let Some(&v) = bst_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", keys.len()), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in keys {
                if let Some(&v) = bt_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_map_get_ordered(c: &mut Criterion) {
    bench_get(c, "map_get_ordered", &ordered_keys(SORTED_N));
}

fn bench_map_get_random(c: &mut Criterion) {
    bench_get(c, "map_get_random", &random_keys(N));
}

// ─── Delete ─────────────────────────────────────────────────────────────────

fn bench_delete(c: &mut Criterion, name: &str, keys: &[i64]) {
    let bst_map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group(name);

    group.bench_function(BenchmarkId::new("BstMap", keys.len()), |b| {
        b.iter_batched(
            || bst_map.clone(),
            |mut map| {
                for k in keys {
                    map.delete(k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", keys.len()), |b| {
        b.iter_batched(
            || bt_map.clone(),
            |mut map| {
                for k in keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_map_delete_ordered(c: &mut Criterion) {
    bench_delete(c, "map_delete_ordered", &ordered_keys(SORTED_N));
}

fn bench_map_delete_random(c: &mut Criterion) {
    bench_delete(c, "map_delete_random", &random_keys(N));
}

// ─── Order statistics ───────────────────────────────────────────────────────

fn bench_map_floor_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let bst_map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let probes: Vec<i64> = keys.iter().map(|k| k + 1).collect();

    let mut group = c.benchmark_group("map_floor_random");

    group.bench_function(BenchmarkId::new("BstMap", N), |b| {
        b.iter(|| probes.iter().filter_map(|k| bst_map.floor(k)).count());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| probes.iter().filter_map(|k| bt_map.range(..=*k).next_back()).count());
    });

    group.finish();
}

fn bench_map_rank_random(c: &mut Criterion) {
    let keys = random_keys(SORTED_N);
    let bst_map: BstMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    c.bench_function("map_rank_random/BstMap", |b| {
        b.iter(|| keys.iter().map(|k| bst_map.rank(k)).sum::<usize>());
    });
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(map_insert_benches, bench_map_insert_ordered, bench_map_insert_reverse, bench_map_insert_random,);

criterion_group!(map_get_benches, bench_map_get_ordered, bench_map_get_random,);

criterion_group!(map_delete_benches, bench_map_delete_ordered, bench_map_delete_random,);

criterion_group!(order_statistic_benches, bench_map_floor_random, bench_map_rank_random,);

criterion_main!(map_insert_benches, map_get_benches, map_delete_benches, order_statistic_benches,);
