// src/bench/harness.rs
//
// Runs one strategy across a list of moduli: time, classify, record,
// continue. One bad modulus never aborts the batch, and an interrupt
// ends the loop with every result collected so far intact.

use crate::attack::{AttackStrategy, Extra, FactorOutcome};
use crate::bench::results::AttackResult;
use crate::core::{BenchRng, ControlSignal};
use crate::keygen::Modulus;
use log::{info, warn};
use num::{BigInt, One};
use serde_json::json;
use std::time::Instant;

pub struct BenchmarkHarness {
    control: ControlSignal,
}

impl BenchmarkHarness {
    pub fn new() -> Self {
        BenchmarkHarness {
            control: ControlSignal::new(),
        }
    }

    /// Harness sharing an externally owned signal, e.g. a Ctrl-C handler.
    pub fn with_control(control: ControlSignal) -> Self {
        BenchmarkHarness { control }
    }

    pub fn control(&self) -> &ControlSignal {
        &self.control
    }

    pub fn run(
        &self,
        strategy: &dyn AttackStrategy,
        moduli: &[Modulus],
        rng: &mut BenchRng,
    ) -> Vec<AttackResult> {
        let mut results = Vec::with_capacity(moduli.len());

        for modulus in moduli {
            // cooperative cancellation, checked between moduli
            if self.control.is_raised() {
                info!(
                    "interrupt before {}-bit modulus; returning {} results",
                    modulus.bits,
                    results.len()
                );
                break;
            }

            info!(
                "{} attacking {}-bit modulus n = {}",
                strategy.name(),
                modulus.bits,
                modulus.n
            );
            let started = Instant::now();
            let outcome = strategy.attack(&modulus.n, &modulus.e, rng);
            let elapsed = started.elapsed().as_secs_f64();

            if self.control.is_raised() {
                let mut extra = Extra::new();
                extra.insert("interrupted".into(), json!(true));
                results.push(AttackResult::failure(
                    modulus.bits,
                    modulus.n.clone(),
                    elapsed,
                    extra,
                ));
                info!("interrupt during attack; returning {} results", results.len());
                break;
            }

            results.push(self.classify(modulus, outcome, elapsed));
        }

        results
    }

    fn classify(
        &self,
        modulus: &Modulus,
        outcome: Result<FactorOutcome, crate::attack::AttackError>,
        elapsed: f64,
    ) -> AttackResult {
        match outcome {
            Ok(FactorOutcome::Found { p, q, mut extra }) => {
                // both cofactors must be nontrivial; (1, n) is not a split
                if &p * &q == modulus.n && p > BigInt::one() && q > BigInt::one() {
                    info!("factored in {:.6}s: {} * {}", elapsed, p, q);
                    AttackResult::success(modulus.bits, modulus.n.clone(), p, q, elapsed, extra)
                } else {
                    warn!(
                        "strategy returned invalid factors {} * {} != {}",
                        p, q, modulus.n
                    );
                    extra.insert("status".into(), json!("invalid_factor"));
                    AttackResult::failure(modulus.bits, modulus.n.clone(), elapsed, extra)
                }
            }
            Ok(FactorOutcome::NotFound { extra }) => {
                info!("no factor after {:.6}s", elapsed);
                AttackResult::failure(modulus.bits, modulus.n.clone(), elapsed, extra)
            }
            Err(err) => {
                warn!("strategy failed on n = {}: {}", modulus.n, err);
                let mut extra = Extra::new();
                extra.insert("error".into(), json!(err.to_string()));
                AttackResult::failure(modulus.bits, modulus.n.clone(), elapsed, extra)
            }
        }
    }
}

impl Default for BenchmarkHarness {
    fn default() -> Self {
        Self::new()
    }
}
