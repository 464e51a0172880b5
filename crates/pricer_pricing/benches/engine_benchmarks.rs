//! Criterion benchmarks for the lattice and Monte Carlo engines.
//!
//! Benchmarks cover:
//! - Lattice backward induction vs the direct terminal sum
//! - Basket Monte Carlo with the shared increment batch
//! - Spread Monte Carlo, sequential vs parallel paths
//! - RNG performance

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::instruments::{ContractSpec, ExerciseStyle, OptionRight, Underlying};
use pricer_models::models::CorrelationMatrix;
use pricer_pricing::lattice::LatticeConfig;
use pricer_pricing::mc::{BasketSpec, MonteCarloConfig};
use pricer_pricing::rng::PricerRng;
use pricer_pricing::{price_via_lattice, price_via_monte_carlo, McVariant};

/// Benchmark RNG generation (foundation for MC simulations).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark lattice pricing with and without early exercise.
fn bench_lattice(c: &mut Criterion) {
    let mut group = c.benchmark_group("lattice");

    let stock = Underlying::new(100.0, 0.2);
    let european = ContractSpec::new(OptionRight::Put, 100.0, 1.0, 0.05);
    let american = european.with_exercise(ExerciseStyle::American);

    for n_steps in [100, 500, 2_000] {
        let config = LatticeConfig::builder().n_steps(n_steps).build().unwrap();

        group.bench_with_input(
            BenchmarkId::new("european_direct_sum", n_steps),
            &config,
            |b, cfg| b.iter(|| price_via_lattice(black_box(&stock), black_box(&european), cfg)),
        );
        group.bench_with_input(
            BenchmarkId::new("american_induction", n_steps),
            &config,
            |b, cfg| b.iter(|| price_via_lattice(black_box(&stock), black_box(&american), cfg)),
        );
    }

    group.finish();
}

/// Benchmark basket and spread Monte Carlo with varying path counts.
fn bench_monte_carlo(c: &mut Criterion) {
    let mut group = c.benchmark_group("monte_carlo");
    group.sample_size(20);

    let basket_assets = [
        Underlying::new(50.0, 0.2),
        Underlying::new(85.0, 0.1),
        Underlying::new(65.0, 0.05),
        Underlying::new(80.0, 0.2),
        Underlying::new(75.0, 0.3),
    ];
    let basket_corr = CorrelationMatrix::from_rows(&[
        vec![1.0, 0.0, 0.0, 0.9, 0.0],
        vec![0.0, 1.0, 0.0, 0.0, 0.0],
        vec![0.0, 0.0, 1.0, -0.1, 0.0],
        vec![0.9, 0.0, -0.1, 1.0, 0.0],
        vec![0.0, 0.0, 0.0, 0.0, 1.0],
    ])
    .unwrap();
    let basket = McVariant::Basket(BasketSpec::new(vec![0.05, 0.0, 0.1, 0.0, 0.0], vec![0.2; 5]));
    let basket_put = ContractSpec::new(OptionRight::Put, 80.0, 1.0, 0.05);

    let legs = [Underlying::new(30.0, 0.2), Underlying::new(31.0, 0.3)];
    let spread_corr = CorrelationMatrix::pair(0.4).unwrap();
    let spread_call = ContractSpec::new(OptionRight::Call, 0.0, 2.0, 0.05);

    for n_paths in [100, 1_000, 10_000] {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(100)
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::new("basket", n_paths), &config, |b, cfg| {
            b.iter(|| price_via_monte_carlo(&basket_assets, &basket_put, &basket_corr, &basket, cfg))
        });
        group.bench_with_input(BenchmarkId::new("spread", n_paths), &config, |b, cfg| {
            b.iter(|| price_via_monte_carlo(&legs, &spread_call, &spread_corr, &McVariant::Spread, cfg))
        });

        let parallel = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(100)
            .parallel(true)
            .build()
            .unwrap();
        group.bench_with_input(
            BenchmarkId::new("spread_parallel", n_paths),
            &parallel,
            |b, cfg| {
                b.iter(|| {
                    price_via_monte_carlo(&legs, &spread_call, &spread_corr, &McVariant::Spread, cfg)
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_rng_generation, bench_lattice, bench_monte_carlo);
criterion_main!(benches);
