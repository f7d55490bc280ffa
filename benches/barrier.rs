use criterion::{criterion_group, criterion_main, Criterion};
use timing_barrier::{barrier, DEFAULT_SAMPLE_COUNT};

fn bench_barrier(c: &mut Criterion) {
    let mut group = c.benchmark_group("barrier");
    group.sample_size(DEFAULT_SAMPLE_COUNT.max(10));

    group.bench_function("u64", |b| {
        let mut x = 1u64;
        b.iter(|| {
            x = x.wrapping_mul(31).wrapping_add(7);
            barrier(&x);
        });
    });

    group.bench_function("array_4k", |b| {
        let buf = [0x5Au8; 4096];
        b.iter(|| barrier(&buf));
    });

    // Reference point: the standard library's hint.
    group.bench_function("std_black_box_u64", |b| {
        let mut x = 1u64;
        b.iter(|| {
            x = x.wrapping_mul(31).wrapping_add(7);
            std::hint::black_box(&x);
        });
    });
    group.finish();
}

criterion_group!(benches, bench_barrier);
criterion_main!(benches);
