//! Benchmarks for certified LDL factorization and precision escalation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use certus_integers::Rational;
use certus_linalg::{decompose, escalate, BallMatrix, EscalationConfig, RationalMatrix};

/// Generates a positive definite matrix `R * R^T + I`.
fn random_positive_definite(n: usize, bits: u32) -> RationalMatrix {
    let mut rng = ChaCha8Rng::seed_from_u64(n as u64);
    let gram = RationalMatrix::randtest_positive_semidefinite(&mut rng, n, bits);
    &gram + &RationalMatrix::identity(n)
}

fn hilbert(n: i64) -> RationalMatrix {
    RationalMatrix::from_rows(
        (0..n)
            .map(|i| (0..n).map(|j| Rational::from_i64(1, i + j + 1)).collect())
            .collect(),
    )
}

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");

    for n in [4, 8, 16] {
        let q = random_positive_definite(n, 32);
        for prec in [64u32, 256, 1024] {
            let a = BallMatrix::from_rational_matrix(&q, prec);
            group.bench_with_input(
                BenchmarkId::new(format!("n={n}"), prec),
                &prec,
                |b, &prec| b.iter(|| black_box(decompose(&a, prec))),
            );
        }
    }

    group.finish();
}

fn bench_escalate(c: &mut Criterion) {
    let mut group = c.benchmark_group("escalate");
    let config = EscalationConfig::new(16, 10_000).expect("valid config");

    for n in [4i64, 8, 12] {
        let q = hilbert(n);
        group.bench_with_input(BenchmarkId::new("hilbert", n), &q, |b, q| {
            b.iter(|| black_box(escalate(q, &config)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decompose, bench_escalate);
criterion_main!(benches);
