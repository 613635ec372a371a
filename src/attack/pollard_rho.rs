// src/attack/pollard_rho.rs
//
// Pollard's rho with Floyd cycle detection. The iteration map is
// f(x) = x² + c mod n; on a degenerate cycle (gcd == n) the walk restarts
// with a fresh random c drawn from the shared RNG, even when the first
// constant was fixed.

use crate::attack::{AttackError, AttackStrategy, Extra, FactorOutcome};
use crate::core::BenchRng;
use crate::integer_math::gcd::gcd;
use log::debug;
use num::{BigInt, Integer, One};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollardRhoConfig {
    /// Starting point of the walk.
    pub x_start: u64,
    /// Constant for the first walk; drawn from the RNG when unset.
    /// Restarts always redraw.
    pub c_start: Option<u64>,
    pub max_iter: u64,
    /// Log progress every this many iterations; 0 disables.
    pub progress_interval: u64,
}

impl Default for PollardRhoConfig {
    fn default() -> Self {
        PollardRhoConfig {
            x_start: 2,
            c_start: None,
            max_iter: 10_000_000,
            progress_interval: 1000,
        }
    }
}

pub struct PollardRho {
    config: PollardRhoConfig,
}

impl PollardRho {
    pub fn new(config: PollardRhoConfig) -> Self {
        PollardRho { config }
    }
}

fn step(x: &BigInt, c: &BigInt, n: &BigInt) -> BigInt {
    (x * x + c).mod_floor(n)
}

impl AttackStrategy for PollardRho {
    fn name(&self) -> &'static str {
        "pollard_rho"
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

        if n.is_even() {
            let mut extra = Extra::new();
            extra.insert("steps".into(), json!(1u64));
            extra.insert("status".into(), json!("factor_found"));
            return Ok(FactorOutcome::found(BigInt::from(2), n / 2, extra));
        }

        // c in [1, n-2]; n is odd and > 2 here so the range is valid
        let random_c = |rng: &mut BenchRng| -> BigInt {
            let upper = n - 2u32;
            rng.next_bigint(&BigInt::one(), &upper)
        };

        let mut x = BigInt::from(self.config.x_start);
        let mut y = x.clone();
        let mut c = match self.config.c_start {
            Some(c) => BigInt::from(c),
            None => random_c(rng),
        };
        let mut iters: u64 = 0;
        let mut restarts: u64 = 0;

        debug!("pollard rho: n = {}, c = {}", n, c);

        loop {
            if iters >= self.config.max_iter {
                // report the exploration state for post-mortem tuning
                let mut extra = Extra::new();
                extra.insert("steps".into(), json!(iters));
                extra.insert("restarts".into(), json!(restarts));
                extra.insert("x_final".into(), json!(x.to_string()));
                extra.insert("y_final".into(), json!(y.to_string()));
                extra.insert("c".into(), json!(c.to_string()));
                extra.insert("status".into(), json!("max_iter_reached"));
                return Ok(FactorOutcome::not_found(extra));
            }
            iters += 1;
            if self.config.progress_interval > 0 && iters % self.config.progress_interval == 0 {
                debug!("pollard rho: {} iterations, {} restarts", iters, restarts);
            }

            x = step(&x, &c, n);
            y = step(&step(&y, &c, n), &c, n);

            let diff = if x >= y { &x - &y } else { &y - &x };
            let d = gcd(&diff, n);
            if &d == n {
                // tortoise and hare collided; a fixed c would just repeat
                // the same cycle, so the restart constant is always random
                x = BigInt::from(self.config.x_start);
                y = x.clone();
                c = random_c(rng);
                restarts += 1;
                continue;
            }
            if d > BigInt::one() {
                let q = n / &d;
                let (p, q) = if d <= q { (d, q) } else { (q, d) };
                let mut extra = Extra::new();
                extra.insert("steps".into(), json!(iters));
                extra.insert("restarts".into(), json!(restarts));
                extra.insert("c".into(), json!(c.to_string()));
                extra.insert("status".into(), json!("factor_found"));
                return Ok(FactorOutcome::found(p, q, extra));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(n: u64, seed: u64) -> FactorOutcome {
        let strategy = PollardRho::new(PollardRhoConfig::default());
        let mut rng = BenchRng::seeded(seed);
        strategy
            .attack(&BigInt::from(n), &BigInt::from(65537u64), &mut rng)
            .unwrap()
    }

    #[test]
    fn test_fixed_start_finds_8051_quickly() {
        // x = y = 2, c = 1 splits 8051 = 83 * 97 within a few iterations
        let strategy = PollardRho::new(PollardRhoConfig {
            c_start: Some(1),
            ..PollardRhoConfig::default()
        });
        let mut rng = BenchRng::seeded(0);
        let outcome = strategy
            .attack(&BigInt::from(8051), &BigInt::from(65537u64), &mut rng)
            .unwrap();
        match outcome {
            FactorOutcome::Found { p, q, extra } => {
                assert_eq!(&p * &q, BigInt::from(8051));
                assert!(extra["steps"].as_u64().unwrap() < 300);
            }
            other => panic!("expected factors of 8051, got {:?}", other),
        }
    }

    #[test]
    fn test_unit_gcd_keeps_walking() {
        // with c = 1 on 10403 every gcd before iteration 9 is 1; the walk
        // must carry through them and split at step 9 with no restart
        let strategy = PollardRho::new(PollardRhoConfig {
            c_start: Some(1),
            ..PollardRhoConfig::default()
        });
        let mut rng = BenchRng::seeded(0);
        let outcome = strategy
            .attack(&BigInt::from(10403), &BigInt::from(3), &mut rng)
            .unwrap();
        match outcome {
            FactorOutcome::Found { p, q, extra } => {
                assert_eq!(p, BigInt::from(101));
                assert_eq!(q, BigInt::from(103));
                assert_eq!(extra["steps"], json!(9u64));
                assert_eq!(extra["restarts"], json!(0u64));
            }
            other => panic!("expected factors of 10403, got {:?}", other),
        }
    }

    #[test]
    fn test_collision_redraws_a_fixed_constant() {
        // c = 1 on 21 collides (gcd == n) at the first step; the restart
        // must draw a random c instead of repeating the dead walk
        let strategy = PollardRho::new(PollardRhoConfig {
            c_start: Some(1),
            max_iter: 10_000,
            ..PollardRhoConfig::default()
        });
        let mut rng = BenchRng::seeded(0);
        let outcome = strategy
            .attack(&BigInt::from(21), &BigInt::from(5), &mut rng)
            .unwrap();
        match outcome {
            FactorOutcome::Found { p, q, extra } => {
                assert_eq!(&p * &q, BigInt::from(21));
                assert!(extra["restarts"].as_u64().unwrap() >= 1);
            }
            other => panic!("expected factors of 21, got {:?}", other),
        }
    }

    #[test]
    fn test_factors_small_semiprime() {
        match run(8051, 42) {
            FactorOutcome::Found { p, q, .. } => {
                assert_eq!(&p * &q, BigInt::from(8051));
                assert_eq!(p, BigInt::from(83));
                assert_eq!(q, BigInt::from(97));
            }
            other => panic!("expected factors of 8051, got {:?}", other),
        }
    }

    #[test]
    fn test_factors_ten_digit_semiprime() {
        match run(10_003_430_467, 42) {
            FactorOutcome::Found { p, q, .. } => {
                assert_eq!(&p * &q, BigInt::from(10_003_430_467u64));
                assert!(p > BigInt::one());
            }
            other => panic!("expected factors, got {:?}", other),
        }
    }

    #[test]
    fn test_even_input_short_circuits() {
        match run(9088, 0) {
            FactorOutcome::Found { p, .. } => assert_eq!(p, BigInt::from(2)),
            other => panic!("expected 2 as a factor, got {:?}", other),
        }
    }

    #[test]
    fn test_deterministic_under_seed() {
        let a = run(10_003_430_467, 7);
        let b = run(10_003_430_467, 7);
        assert_eq!(a, b);
    }

    #[test]
    fn test_iteration_bound_is_soft_failure() {
        let strategy = PollardRho::new(PollardRhoConfig {
            max_iter: 2,
            ..PollardRhoConfig::default()
        });
        let mut rng = BenchRng::seeded(0);
        let outcome = strategy
            .attack(&BigInt::from(10_003_430_467u64), &BigInt::from(3), &mut rng)
            .unwrap();
        match outcome {
            FactorOutcome::NotFound { extra } => {
                assert_eq!(extra["status"], json!("max_iter_reached"));
                for key in ["x_final", "y_final", "c"] {
                    assert!(extra.contains_key(key), "missing {}", key);
                }
            }
            other => panic!("expected max_iter_reached, got {:?}", other),
        }
    }

    #[test]
    fn test_fixed_constant_is_reproducible() {
        let strategy = PollardRho::new(PollardRhoConfig {
            c_start: Some(1),
            ..PollardRhoConfig::default()
        });
        let mut rng_a = BenchRng::seeded(1);
        let mut rng_b = BenchRng::seeded(999);
        let n = BigInt::from(10403);
        // the constant is fixed, so different seeds must not change the walk
        let a = strategy.attack(&n, &BigInt::from(3), &mut rng_a).unwrap();
        let b = strategy.attack(&n, &BigInt::from(3), &mut rng_b).unwrap();
        assert_eq!(a, b);
    }
}
