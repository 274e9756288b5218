use bc_math::{Interpolation1D, LinearInterpolation, LogLinearInterpolation};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn node_set(n: usize) -> (Vec<f64>, Vec<f64>) {
    let xs: Vec<f64> = (0..n).map(|i| i as f64 * 0.25).collect();
    let ys: Vec<f64> = xs.iter().map(|&t| (-0.02 * t).exp()).collect();
    (xs, ys)
}

fn bench_linear(c: &mut Criterion) {
    let (xs, ys) = node_set(40);
    let interp = LinearInterpolation::new(&xs, &ys).unwrap();
    c.bench_function("linear_eval", |b| {
        b.iter(|| interp.value_unchecked(black_box(4.37)))
    });
}

fn bench_log_linear(c: &mut Criterion) {
    let (xs, ys) = node_set(40);
    let interp = LogLinearInterpolation::new(&xs, &ys).unwrap();
    c.bench_function("log_linear_eval", |b| {
        b.iter(|| interp.value_unchecked(black_box(4.37)))
    });
}

fn bench_rebuild(c: &mut Criterion) {
    let (xs, ys) = node_set(40);
    c.bench_function("log_linear_rebuild", |b| {
        b.iter(|| LogLinearInterpolation::new(black_box(&xs), black_box(&ys)).unwrap())
    });
}

criterion_group!(benches, bench_linear, bench_log_linear, bench_rebuild);
criterion_main!(benches);
