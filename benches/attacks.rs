// benches/attacks.rs

use criterion::{criterion_group, criterion_main, Criterion};
use factorbench::attack::fermat::{Fermat, FermatConfig};
use factorbench::attack::pollard_rho::{PollardRho, PollardRhoConfig};
use factorbench::attack::trial_division::{TrialDivision, TrialDivisionConfig};
use factorbench::attack::AttackStrategy;
use factorbench::core::BenchRng;
use factorbench::qs::{QsConfig, QuadraticSieveEngine};
use num::BigInt;

fn bench_trial_division(c: &mut Criterion) {
    let strategy = TrialDivision::new(TrialDivisionConfig::default());
    let n = BigInt::from(1_000_730_021u64); // 10007 * 100003
    let e = BigInt::from(65537u64);
    c.bench_function("trial_division_30bit", |b| {
        b.iter(|| {
            let mut rng = BenchRng::seeded(0);
            strategy.attack(&n, &e, &mut rng).unwrap()
        })
    });
}

fn bench_pollard_rho(c: &mut Criterion) {
    let strategy = PollardRho::new(PollardRhoConfig::default());
    let n = BigInt::from(10_003_430_467u64); // 31531 * 317257
    let e = BigInt::from(65537u64);
    c.bench_function("pollard_rho_34bit", |b| {
        b.iter(|| {
            let mut rng = BenchRng::seeded(42);
            strategy.attack(&n, &e, &mut rng).unwrap()
        })
    });
}

fn bench_fermat(c: &mut Criterion) {
    let strategy = Fermat::new(FermatConfig::default());
    let n = BigInt::from(10403u64); // 101 * 103, close factors
    let e = BigInt::from(65537u64);
    c.bench_function("fermat_close_factors", |b| {
        b.iter(|| {
            let mut rng = BenchRng::seeded(0);
            strategy.attack(&n, &e, &mut rng).unwrap()
        })
    });
}

fn bench_quadratic_sieve(c: &mut Criterion) {
    let config = QsConfig {
        b: Some(200),
        m: Some(2000),
        ..QsConfig::default()
    };
    let n = BigInt::from(10403u64);
    c.bench_function("quadratic_sieve_small", |b| {
        b.iter(|| {
            let mut rng = BenchRng::seeded(1);
            QuadraticSieveEngine::new(config.clone()).factor(&n, &mut rng)
        })
    });
}

criterion_group!(
    attacks,
    bench_trial_division,
    bench_pollard_rho,
    bench_fermat,
    bench_quadratic_sieve
);
criterion_main!(attacks);
