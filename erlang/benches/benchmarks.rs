use criterion::{criterion_group, criterion_main, Criterion};
use erlang::{blocking, offered_capacity, trunks_for};

fn erlang_b(c: &mut Criterion) {
    let mut group = c.benchmark_group("Erlang-B");

    group.bench_with_input("blocking", &(1_000usize, 950.0f64), |b, (n, a)| {
        b.iter(|| blocking(*n, *a))
    });

    group.bench_with_input("trunks_for", &(950.0f64, 0.01f64), |b, (a, t)| {
        b.iter(|| trunks_for(*a, *t).unwrap())
    });

    group.bench_with_input("offered_capacity", &(1_000usize, 0.01f64), |b, (n, t)| {
        b.iter(|| offered_capacity(*n, *t).unwrap())
    });
}

criterion_group!(benches, erlang_b);
criterion_main!(benches);
