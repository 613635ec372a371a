// src/attack/fermat.rs
//
// Fermat's method: search a upward from ceil(sqrt(n)) until a² - n is a
// perfect square b², then n = (a - b)(a + b). Fast only when the factors
// are close together.

use crate::attack::{AttackError, AttackStrategy, Extra, FactorOutcome};
use crate::core::BenchRng;
use log::debug;
use num::{BigInt, Integer, One};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FermatConfig {
    pub max_iter: u64,
    /// Log progress every this many iterations; 0 disables.
    pub progress_interval: u64,
}

impl Default for FermatConfig {
    fn default() -> Self {
        FermatConfig {
            max_iter: 10_000_000,
            progress_interval: 100_000,
        }
    }
}

pub struct Fermat {
    config: FermatConfig,
}

impl Fermat {
    pub fn new(config: FermatConfig) -> Self {
        Fermat { config }
    }
}

impl AttackStrategy for Fermat {
    fn name(&self) -> &'static str {
        "fermat"
    }

    fn attack(
        &self,
        n: &BigInt,
        _e: &BigInt,
        _rng: &mut BenchRng,
    ) -> Result<FactorOutcome, AttackError> {
        if n <= &BigInt::one() {
            let mut extra = Extra::new();
            extra.insert("status".into(), json!("trivial_input"));
            return Ok(FactorOutcome::not_found(extra));
        }

        if n.is_even() {
            let mut extra = Extra::new();
            extra.insert("steps".into(), json!(1u64));
            extra.insert("status".into(), json!("factor_found"));
            return Ok(FactorOutcome::found(BigInt::from(2), n / 2, extra));
        }

        let mut a = n.sqrt();
        if &(&a * &a) < n {
            a += 1u32;
        }

        let mut iters: u64 = 0;
        loop {
            let b2 = &a * &a - n;
            let b = b2.sqrt();
            if &b * &b == b2 {
                let p = &a - &b;
                let q = &a + &b;
                let mut extra = Extra::new();
                extra.insert("steps".into(), json!(iters));
                // a - b == 1 means we only rediscovered n itself
                if p > BigInt::one() && &q < n {
                    extra.insert("status".into(), json!("factor_found"));
                    return Ok(FactorOutcome::found(p, q, extra));
                }
                extra.insert("status".into(), json!("trivial_square"));
                return Ok(FactorOutcome::not_found(extra));
            }

            a += 1u32;
            iters += 1;
            if self.config.progress_interval > 0 && iters % self.config.progress_interval == 0 {
                debug!("fermat: {} iterations, a = {}", iters, a);
            }
            if iters >= self.config.max_iter {
                let mut extra = Extra::new();
                extra.insert("steps".into(), json!(iters));
                extra.insert("status".into(), json!("max_iter_reached"));
                return Ok(FactorOutcome::not_found(extra));
            }
        }
    }
}
