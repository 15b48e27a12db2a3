//! Hinge loss benchmarks
//!
//! Compares the naive and vectorized strategies across batch sizes and
//! feature dimensions.
//!
//! ```bash
//! cargo bench --bench loss_benchmark
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use svm_loss::utils::random::{RandomProblem, DEFAULT_WEIGHT_SCALE};
use svm_loss::{LossFunction, NaiveHingeLoss, VectorizedHingeLoss};

const REG: f64 = 5e-6;

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("hinge_loss");

    for &(n, d) in &[(64, 128), (256, 512), (500, 3073)] {
        let problem = RandomProblem::generate(n, d, 10, DEFAULT_WEIGHT_SCALE, 42)
            .expect("Failed to generate problem");
        let id = format!("{n}x{d}");
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("naive", &id), &problem, |b, p| {
            let loss = NaiveHingeLoss::new();
            b.iter(|| {
                loss.loss_and_grad(
                    black_box(&p.weights),
                    black_box(&p.batch),
                    black_box(&p.labels),
                    REG,
                )
            })
        });

        group.bench_with_input(BenchmarkId::new("vectorized", &id), &problem, |b, p| {
            let loss = VectorizedHingeLoss::new();
            b.iter(|| {
                loss.loss_and_grad(
                    black_box(&p.weights),
                    black_box(&p.batch),
                    black_box(&p.labels),
                    REG,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_strategies);
criterion_main!(benches);
