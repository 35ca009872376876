use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use he::bfv::{BfvContext, BfvParameters};
use he::ckks::{CkksContext, CkksParameters};
use he_traits::{HeDecrypter, HeEncrypter, HeEvaluator, HeMultiplier};
use itertools::Itertools;
use num_bigint::BigUint;
use std::time::Duration;

pub fn ckks_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("ckks");
    group.sample_size(10);
    group.warm_up_time(Duration::from_millis(600));
    group.measurement_time(Duration::from_millis(1000));

    let par = CkksParameters::default_arc();
    let ctx = CkksContext::new(&par).unwrap();
    let values = (0..par.max_slots()).map(|i| i as f64 / 7.0).collect_vec();
    let ct = ctx.try_encrypt(values.as_slice()).unwrap();
    let name = format!("n={}/slots={}", par.degree(), values.len());

    group.bench_function(BenchmarkId::new("encrypt", &name), |b| {
        b.iter(|| ctx.try_encrypt(values.as_slice()));
    });

    group.bench_function(BenchmarkId::new("decrypt", &name), |b| {
        b.iter(|| -> he::Result<Vec<f64>> { ctx.try_decrypt(&ct) });
    });

    group.bench_function(BenchmarkId::new("add", &name), |b| {
        b.iter(|| ctx.try_add(&ct, &ct));
    });

    group.bench_function(BenchmarkId::new("mul", &name), |b| {
        b.iter(|| ctx.try_mul(&ct, &ct));
    });

    group.finish();
}

pub fn bfv_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("bfv");
    group.warm_up_time(Duration::from_millis(600));
    group.measurement_time(Duration::from_millis(1000));

    let par = BfvParameters::default_arc();
    let ctx = BfvContext::new(&par).unwrap();
    let values = (1..=10u64).map(BigUint::from).collect_vec();
    let ct = ctx.try_encrypt(values.as_slice()).unwrap();

    group.bench_function("encrypt", |b| {
        b.iter(|| ctx.try_encrypt(values.as_slice()));
    });

    group.bench_function("decrypt", |b| {
        b.iter(|| -> he::Result<Vec<BigUint>> { ctx.try_decrypt(&ct) });
    });

    group.bench_function("add", |b| {
        b.iter(|| ctx.try_add(&ct, &ct));
    });

    group.bench_function("mul", |b| {
        b.iter(|| ctx.try_mul(&ct, &ct));
    });

    group.finish();
}

criterion_group!(toy_schemes, ckks_benchmark, bfv_benchmark);
criterion_main!(toy_schemes);
