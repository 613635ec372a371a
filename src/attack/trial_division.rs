// src/attack/trial_division.rs
//
// Trial division family: O(sqrt(n)) with variants on divisor stride.
// The step count is a literal, reproducible cost metric: the number of
// divisor tests performed.

use crate::attack::{AttackError, AttackStrategy, Extra, FactorOutcome};
use crate::core::BenchRng;
use log::debug;
use num::{BigInt, FromPrimitive, Integer, One, ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Divisor stride variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialDivisionVariant {
    /// Every integer from 2.
    Every,
    /// 2, then odd numbers from 3.
    Odd,
    /// A small prime list first, then odd residues from 101.
    PrimesFirst,
    /// Mod-30 wheel skipping multiples of 2, 3 and 5.
    Wheel30,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrialDivisionConfig {
    pub variant: TrialDivisionVariant,
    /// Scale the sqrt(n) divisor bound; values below 1.0 cut the search
    /// short (soft failure past the bound).
    pub limit_factor: Option<f64>,
    /// Log progress every this many divisor tests; 0 disables.
    pub progress_interval: u64,
}

impl Default for TrialDivisionConfig {
    fn default() -> Self {
        TrialDivisionConfig {
            variant: TrialDivisionVariant::Odd,
            limit_factor: None,
            progress_interval: 100_000,
        }
    }
}

pub struct TrialDivision {
    config: TrialDivisionConfig,
}

impl TrialDivision {
    pub fn new(config: TrialDivisionConfig) -> Self {
        TrialDivision { config }
    }

    fn divisor_bound(&self, n: &BigInt) -> u64 {
        let sqrt_n = n.sqrt();
        let bound = match self.config.limit_factor {
            Some(factor) => {
                let scaled = sqrt_n.to_f64().unwrap_or(f64::MAX) * factor;
                BigInt::from_f64(scaled)
                    .unwrap_or_else(|| sqrt_n.clone())
                    .min(sqrt_n)
            }
            None => sqrt_n,
        };
        bound.to_u64().unwrap_or(u64::MAX)
    }
}

const SMALL_PRIMES: [u64; 25] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Mod-30 wheel increments starting from 7.
const WHEEL30: [u64; 8] = [4, 2, 4, 2, 4, 6, 2, 6];

impl AttackStrategy for TrialDivision {
    fn name(&self) -> &'static str {
        "trial_division"
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

        let limit = self.divisor_bound(n);
        let progress = self.config.progress_interval;
        debug!(
            "trial division ({:?}): checking divisors up to {}",
            self.config.variant, limit
        );

        let mut steps: u64 = 0;
        let try_divisor = |divisor: u64, steps: &mut u64| -> Option<(BigInt, BigInt)> {
            *steps += 1;
            if progress > 0 && *steps % progress == 0 {
                debug!(
                    "trial division: {} tests, at divisor {} of {}",
                    steps, divisor, limit
                );
            }
            let d = BigInt::from(divisor);
            if n.is_multiple_of(&d) {
                let quotient = n / &d;
                Some((d, quotient))
            } else {
                None
            }
        };

        let found = match self.config.variant {
            TrialDivisionVariant::Every => {
                let mut hit = None;
                let mut d = 2u64;
                while d <= limit {
                    if let Some(pair) = try_divisor(d, &mut steps) {
                        hit = Some(pair);
                        break;
                    }
                    d += 1;
                }
                hit
            }
            TrialDivisionVariant::Odd => {
                if n.is_even() {
                    steps = 1;
                    Some((BigInt::from(2), n / 2))
                } else {
                    let mut hit = None;
                    let mut d = 3u64;
                    while d <= limit {
                        if let Some(pair) = try_divisor(d, &mut steps) {
                            hit = Some(pair);
                            break;
                        }
                        d += 2;
                    }
                    hit
                }
            }
            TrialDivisionVariant::PrimesFirst => {
                let mut hit = None;
                for &p in SMALL_PRIMES.iter() {
                    if p > limit {
                        break;
                    }
                    if let Some(pair) = try_divisor(p, &mut steps) {
                        hit = Some(pair);
                        break;
                    }
                }
                if hit.is_none() {
                    let mut d = 101u64;
                    while d <= limit {
                        if let Some(pair) = try_divisor(d, &mut steps) {
                            hit = Some(pair);
                            break;
                        }
                        d += 2;
                    }
                }
                hit
            }
            TrialDivisionVariant::Wheel30 => {
                let mut hit = None;
                for &p in &[2u64, 3, 5] {
                    if let Some(pair) = try_divisor(p, &mut steps) {
                        hit = Some(pair);
                        break;
                    }
                }
                if hit.is_none() {
                    let mut d = 7u64;
                    let mut spoke = 0usize;
                    while d <= limit {
                        if let Some(pair) = try_divisor(d, &mut steps) {
                            hit = Some(pair);
                            break;
                        }
                        d += WHEEL30[spoke];
                        spoke = (spoke + 1) % WHEEL30.len();
                    }
                }
                hit
            }
        };

        let mut extra = Extra::new();
        extra.insert("steps".into(), json!(steps));
        extra.insert("variant".into(), json!(variant_name(self.config.variant)));

        match found {
            Some((p, q)) => {
                extra.insert("status".into(), json!("factor_found"));
                Ok(FactorOutcome::found(p, q, extra))
            }
            None => {
                extra.insert("status".into(), json!("no_divisor_below_limit"));
                Ok(FactorOutcome::not_found(extra))
            }
        }
    }
}

fn variant_name(variant: TrialDivisionVariant) -> &'static str {
    match variant {
        TrialDivisionVariant::Every => "every",
        TrialDivisionVariant::Odd => "odd",
        TrialDivisionVariant::PrimesFirst => "primes_first",
        TrialDivisionVariant::Wheel30 => "wheel30",
    }
}

/// Completely factor n by trial division. Returns the prime factors in
/// ascending order, with multiplicity.
pub fn complete_factorization(n: &BigInt, limit: Option<u64>) -> Option<Vec<BigInt>> {
    if n <= &BigInt::one() {
        return None;
    }

    let mut factors = Vec::new();
    let mut remaining = n.clone();

    let two = BigInt::from(2);
    while remaining.is_even() {
        factors.push(two.clone());
        remaining /= &two;
    }

    let upper_bound = match limit {
        Some(lim) => BigInt::from(lim),
        None => remaining.sqrt(),
    };

    let mut divisor = BigInt::from(3);
    while divisor <= upper_bound && remaining > BigInt::one() {
        while remaining.is_multiple_of(&divisor) {
            factors.push(divisor.clone());
            remaining /= &divisor;
        }
        divisor += 2u32;
    }

    if remaining > BigInt::one() {
        factors.push(remaining);
    }

    Some(factors)
}
