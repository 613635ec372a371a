// src/attack/quadratic_sieve.rs
//
// Strategy adapter over the quadratic sieve engine: maps the engine
// outcome onto the harness contract and surfaces the run diagnostics.

use crate::attack::{AttackError, AttackStrategy, Extra, FactorOutcome};
use crate::core::BenchRng;
use crate::qs::{QsConfig, QsStats, QuadraticSieveEngine};
use num::{BigInt, Integer, One};
use serde_json::json;

pub struct QuadraticSieve {
    config: QsConfig,
}

impl QuadraticSieve {
    pub fn new(config: QsConfig) -> Self {
        QuadraticSieve { config }
    }
}

fn stats_extra(stats: &QsStats) -> Extra {
    let mut extra = Extra::new();
    extra.insert("B".into(), json!(stats.b));
    extra.insert("M".into(), json!(stats.m));
    extra.insert("fb_size".into(), json!(stats.fb_size));
    extra.insert("relations".into(), json!(stats.relations));
    extra.insert("blocks".into(), json!(stats.blocks));
    extra.insert("dependencies".into(), json!(stats.dependencies));
    extra.insert("steps".into(), json!(stats.relations));
    extra
}

impl AttackStrategy for QuadraticSieve {
    fn name(&self) -> &'static str {
        "quadratic_sieve"
    }

    fn attack(
        &self,
        n: &BigInt,
        _e: &BigInt,
        rng: &mut BenchRng,
    ) -> Result<FactorOutcome, AttackError> {
        if n <= &BigInt::one() {
            let mut extra = Extra::new();
            extra.insert("status".into(), json!("trivial_input"));
            return Ok(FactorOutcome::not_found(extra));
        }

        let engine = QuadraticSieveEngine::new(self.config.clone());
        let outcome = engine.factor(n, rng);
        let mut extra = stats_extra(&outcome.stats);

        match outcome.factor {
            Some(g) => {
                if !n.is_multiple_of(&g) {
                    return Err(AttackError::Internal(format!(
                        "engine returned {} which does not divide {}",
                        g, n
                    )));
                }
                let q = n / &g;
                let (p, q) = if g <= q { (g, q) } else { (q, g) };
                extra.insert("status".into(), json!("factor_found"));
                Ok(FactorOutcome::found(p, q, extra))
            }
            None => {
                extra.insert("status".into(), json!("exhausted"));
                Ok(FactorOutcome::not_found(extra))
            }
        }
    }
}
