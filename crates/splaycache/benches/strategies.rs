use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use splaycache::{
    FibonacciStrategy, LruFibonacci, Query, RangeArray, RangeStrategy, RangeSumCache,
    SplayFibonacci, UncachedRangeStore,
};

const ARRAY_SIZE: usize = 10_000;
const QUERIES: usize = 5_000;
const SEED: u64 = 42;

fn workload(range_ratio: f64) -> (Vec<u64>, Vec<Query>) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let values = (0..ARRAY_SIZE).map(|_| rng.gen_range(1..=1000)).collect();
    let queries = (0..QUERIES)
        .map(|_| {
            if rng.gen_bool(range_ratio) {
                let left = rng.gen_range(0..ARRAY_SIZE);
                let right = rng.gen_range(left..ARRAY_SIZE);
                Query::Range { left, right }
            } else {
                Query::Update {
                    index: rng.gen_range(0..ARRAY_SIZE),
                    value: rng.gen_range(1..=1000),
                }
            }
        })
        .collect();
    (values, queries)
}

fn run(strategy: &mut dyn RangeStrategy, queries: &[Query]) {
    for query in queries {
        black_box(strategy.query(query).unwrap());
    }
}

fn bench_range_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum");
    group.sample_size(20);
    group.throughput(Throughput::Elements(QUERIES as u64));

    for ratio in [0.7, 1.0] {
        let (values, queries) = workload(ratio);

        group.bench_with_input(BenchmarkId::new("no-cache", ratio), &queries, |b, queries| {
            b.iter(|| {
                let mut store = UncachedRangeStore::new(RangeArray::new(values.clone()));
                run(&mut store, queries);
            });
        });

        group.bench_with_input(BenchmarkId::new("lru-cache", ratio), &queries, |b, queries| {
            b.iter(|| {
                let mut cache = RangeSumCache::new(RangeArray::new(values.clone()));
                run(&mut cache, queries);
            });
        });
    }

    group.finish();
}

fn bench_repeated_ranges(c: &mut Criterion) {
    let mut group = c.benchmark_group("range_sum_hot");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("lru_cache_hit", |b| {
        let (values, _) = workload(1.0);
        let mut cache = RangeSumCache::new(RangeArray::new(values));
        cache.range_sum(0, ARRAY_SIZE - 1).unwrap();

        b.iter(|| {
            black_box(cache.range_sum(0, ARRAY_SIZE - 1).unwrap());
        });
    });

    group.finish();
}

fn bench_fibonacci(c: &mut Criterion) {
    let mut group = c.benchmark_group("fibonacci");
    group.sample_size(20);

    for n in [100u64, 500, 950] {
        group.bench_with_input(BenchmarkId::new("lru-cache", n), &n, |b, &n| {
            b.iter(|| black_box(LruFibonacci::new().compute(n)));
        });

        group.bench_with_input(BenchmarkId::new("splay-tree", n), &n, |b, &n| {
            b.iter(|| black_box(SplayFibonacci::new().compute(n)));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_range_strategies,
    bench_repeated_ranges,
    bench_fibonacci
);
criterion_main!(benches);
