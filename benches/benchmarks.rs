use std::iter;

use bloomset::BloomFilter;
use criterion::Criterion;

fn key(rng: &fastrand::Rng) -> String {
    iter::repeat_with(|| rng.alphanumeric()).take(32).collect()
}

fn keys(rng: &fastrand::Rng, n: usize) -> Vec<String> {
    iter::repeat_with(|| key(rng)).take(n).collect()
}

fn bench_bloom_filter_insert(c: &mut Criterion) {
    let rng = fastrand::Rng::new();

    for n in [1000, 10000] {
        c.bench_function(&format!("insert-{}", n), |b| {
            let mut bf = BloomFilter::new(n, 0.01).unwrap();

            b.iter(|| {
                let item = key(&rng);
                bf.insert(&item);
            });
        });
    }

    c.bench_function("insert-all-1000", |b| {
        let items = keys(&rng, 1000);

        b.iter(|| {
            let mut bf = BloomFilter::new(1000, 0.01).unwrap();
            bf.insert_all(&items);
            bf
        });
    });
}

fn bench_bloom_filter_check(c: &mut Criterion) {
    let rng = fastrand::Rng::new();

    for n in [1000, 10000] {
        c.bench_function(&format!("check-{}", n), |b| {
            let mut bf = BloomFilter::new(n, 0.01).unwrap();
            bf.insert_all(keys(&rng, n));

            b.iter(|| {
                let item = key(&rng);
                bf.contains(&item)
            });
        });
    }
}

fn bench_bloom_filter_snapshot(c: &mut Criterion) {
    let rng = fastrand::Rng::new();
    let mut bf = BloomFilter::new(10000, 0.01).unwrap();
    bf.insert_all(keys(&rng, 10000));

    c.bench_function("snapshot-10000", |b| b.iter(|| bf.snapshot()));

    let json = bf.to_json().unwrap();
    c.bench_function("restore-json-10000", |b| {
        b.iter(|| BloomFilter::from_json(&json).unwrap())
    });
}

criterion::criterion_group!(
    benches,
    bench_bloom_filter_insert,
    bench_bloom_filter_check,
    bench_bloom_filter_snapshot
);
criterion::criterion_main!(benches);
