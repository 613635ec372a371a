// src/attack/pollard_pm1.rs
//
// Pollard's p-1: raise a base to successive factorials modulo n and take
// gcd(a - 1, n) at each step. Succeeds when some prime factor p of n has
// p - 1 built from small primes only.

use crate::attack::{AttackError, AttackStrategy, Extra, FactorOutcome};
use crate::core::BenchRng;
use crate::integer_math::gcd::gcd;
use log::debug;
use num::{BigInt, Integer, One};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollardPm1Config {
    /// Base of the exponentiation chain.
    pub a_start: u64,
    /// Largest factorial exponent tried before giving up.
    pub max_iter: u64,
    /// Log progress every this many iterations; 0 disables.
    pub progress_interval: u64,
}

impl Default for PollardPm1Config {
    fn default() -> Self {
        PollardPm1Config {
            a_start: 2,
            max_iter: 100_000,
            progress_interval: 1000,
        }
    }
}

pub struct PollardPm1 {
    config: PollardPm1Config,
}

impl PollardPm1 {
    pub fn new(config: PollardPm1Config) -> Self {
        PollardPm1 { config }
    }
}

impl AttackStrategy for PollardPm1 {
    fn name(&self) -> &'static str {
        "pollard_pm1"
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

        let mut a = BigInt::from(self.config.a_start);
        let mut i: u64 = 2;
        let mut steps: u64 = 0;

        while i <= self.config.max_iter {
            steps += 1;
            a = a.modpow(&BigInt::from(i), n);
            let d = gcd(&(&a - 1u32), n);
            if d > BigInt::one() && &d < n {
                let q = n / &d;
                let (p, q) = if d <= q { (d, q) } else { (q, d) };
                let mut extra = Extra::new();
                extra.insert("steps".into(), json!(steps));
                extra.insert("smoothness_bound".into(), json!(i));
                extra.insert("status".into(), json!("factor_found"));
                return Ok(FactorOutcome::found(p, q, extra));
            }
            if &d == n {
                // a hit 1 mod n: all factors collapsed at once, no split
                let mut extra = Extra::new();
                extra.insert("steps".into(), json!(steps));
                extra.insert("status".into(), json!("degenerate_gcd"));
                return Ok(FactorOutcome::not_found(extra));
            }

            if self.config.progress_interval > 0 && steps % self.config.progress_interval == 0 {
                debug!("pollard p-1: exponent {} of {}", i, self.config.max_iter);
            }
            i += 1;
        }

        // report the exploration state so a rerun can pick up the bound
        let mut extra = Extra::new();
        extra.insert("steps".into(), json!(steps));
        extra.insert("a_final".into(), json!(a.to_string()));
        extra.insert("i_final".into(), json!(i - 1));
        extra.insert("status".into(), json!("max_iter_reached"));
        Ok(FactorOutcome::not_found(extra))
    }
}
