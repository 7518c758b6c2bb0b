//! Benchmarks for decision tree training and prediction.

use c45tree::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

// Two interleaved spirals of points, quantized so thresholds repeat.
fn make_data(size: usize) -> (Matrix<f64>, Vec<usize>) {
    let mut data = Vec::with_capacity(size * 2);
    let mut labels = Vec::with_capacity(size);
    for i in 0..size {
        let class = i % 2;
        let t = (i / 2) as f64 * 0.1;
        let sign = if class == 0 { 1.0 } else { -1.0 };
        data.push((sign * t * t.cos() * 10.0).round() / 10.0);
        data.push((sign * t * t.sin() * 10.0).round() / 10.0);
        labels.push(class);
    }
    let x = Matrix::from_vec(size, 2, data).unwrap();
    (x, labels)
}

fn bench_tree_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("c45_fit");

    for size in [10, 50, 100, 500].iter() {
        let (x, y) = make_data(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut clf = C45Classifier::new();
                clf.fit(black_box(&x), black_box(&y)).unwrap()
            });
        });
    }

    group.finish();
}

fn bench_tree_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("c45_predict");

    for size in [10, 50, 100, 500].iter() {
        let (x, y) = make_data(*size);

        let mut clf = C45Classifier::new();
        clf.fit(&x, &y).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| clf.predict(black_box(&x)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tree_fit, bench_tree_predict);
criterion_main!(benches);
