// tests/harness_tests.rs
//
// Harness-level behavior: error recovery, interruption, validation and
// reproducibility, exercised through the public strategy contract.

use factorbench::attack::{AttackError, AttackStrategy, Extra, FactorOutcome};
use factorbench::bench::BenchmarkHarness;
use factorbench::core::{BenchRng, ControlSignal};
use factorbench::keygen::Modulus;
use num::BigInt;
use serde_json::json;

fn modulus(n: u64) -> Modulus {
    let n = BigInt::from(n);
    let bits = n.bits() as u32;
    Modulus {
        n,
        e: BigInt::from(65537u64),
        bits,
    }
}

fn five_moduli() -> Vec<Modulus> {
    [15u64, 21, 33, 35, 77].iter().map(|&n| modulus(n)).collect()
}

struct AlwaysErr;

impl AttackStrategy for AlwaysErr {
    fn name(&self) -> &'static str {
        "always_err"
    }
    fn attack(
        &self,
        _n: &BigInt,
        _e: &BigInt,
        _rng: &mut BenchRng,
    ) -> Result<FactorOutcome, AttackError> {
        Err(AttackError::Internal("simulated breakage".into()))
    }
}

#[test]
fn erroring_strategy_never_aborts_the_batch() {
    let harness = BenchmarkHarness::new();
    let mut rng = BenchRng::seeded(0);
    let moduli = five_moduli();
    let results = harness.run(&AlwaysErr, &moduli, &mut rng);

    assert_eq!(results.len(), moduli.len());
    for result in &results {
        assert!(!result.success);
        assert!(result.p.is_none() && result.q.is_none());
        assert_eq!(
            result.extra["error"],
            json!("internal error: simulated breakage")
        );
    }
}

struct RaisesMidAttack {
    control: ControlSignal,
}

impl AttackStrategy for RaisesMidAttack {
    fn name(&self) -> &'static str {
        "raises_mid_attack"
    }
    fn attack(
        &self,
        n: &BigInt,
        _e: &BigInt,
        _rng: &mut BenchRng,
    ) -> Result<FactorOutcome, AttackError> {
        // simulate an interrupt arriving while the attack runs
        self.control.raise();
        Ok(FactorOutcome::found(
            BigInt::from(3),
            n / 3,
            Extra::new(),
        ))
    }
}

#[test]
fn interrupt_after_first_modulus_keeps_one_result() {
    let harness = BenchmarkHarness::new();
    let strategy = RaisesMidAttack {
        control: harness.control().clone(),
    };
    let mut rng = BenchRng::seeded(0);
    let results = harness.run(&strategy, &five_moduli(), &mut rng);

    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(results[0].extra["interrupted"], json!(true));
    assert_eq!(results[0].n, BigInt::from(15));
}

struct WrongFactors;

impl AttackStrategy for WrongFactors {
    fn name(&self) -> &'static str {
        "wrong_factors"
    }
    fn attack(
        &self,
        _n: &BigInt,
        _e: &BigInt,
        _rng: &mut BenchRng,
    ) -> Result<FactorOutcome, AttackError> {
        Ok(FactorOutcome::found(
            BigInt::from(2),
            BigInt::from(9),
            Extra::new(),
        ))
    }
}

#[test]
fn invalid_factors_are_recorded_not_propagated() {
    let harness = BenchmarkHarness::new();
    let mut rng = BenchRng::seeded(0);
    let results = harness.run(&WrongFactors, &[modulus(15), modulus(21)], &mut rng);

    assert_eq!(results.len(), 2);
    for result in &results {
        assert!(!result.success);
        assert_eq!(result.extra["status"], json!("invalid_factor"));
    }
}

#[test]
fn fixed_seed_reproduces_every_outcome() {
    use factorbench::attack::strategy_by_name;
    use factorbench::config::BenchConfig;
    use factorbench::keygen::RsaKeyGen;

    let config = BenchConfig::default();
    let strategy = strategy_by_name("pollard_rho", &config).unwrap();
    let keygen = RsaKeyGen::default();

    let run = |seed: u64| {
        let mut rng = BenchRng::seeded(seed);
        let moduli: Vec<Modulus> = [16u32, 20, 24]
            .iter()
            .map(|&bits| keygen.generate(bits, &mut rng).modulus())
            .collect();
        BenchmarkHarness::new().run(strategy.as_ref(), &moduli, &mut rng)
    };

    let first = run(1234);
    let second = run(1234);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert!(a.same_outcome(b), "diverged on n = {}", a.n);
    }
}
