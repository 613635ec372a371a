// src/qs/sieve.rs
//
// Logarithmic sieve over one block of positions. Float log-scores only
// select candidates; smoothness is confirmed by exact trial division, so
// rounding error can miss a relation but never admit a wrong one.

use crate::qs::factor_base::FactorBase;
use crate::qs::params::LOG_THRESHOLD;
use crate::qs::relations::Relation;
use log::trace;
use num::{BigInt, Integer, One, Signed, ToPrimitive, Zero};
use rayon::prelude::*;
use std::collections::BTreeMap;

/// One sieve block: positions a in [center - half_width, center + half_width].
#[derive(Debug, Clone)]
pub struct SieveBlock {
    pub center: BigInt,
    pub half_width: u64,
}

impl SieveBlock {
    pub fn size(&self) -> usize {
        (2 * self.half_width + 1) as usize
    }

    /// Center of the block following this one.
    pub fn next_center(&self) -> BigInt {
        &self.center + BigInt::from(2 * self.half_width + 1)
    }
}

/// ln|q| with a bit-length fallback outside f64 range.
fn log_magnitude(q: &BigInt) -> f64 {
    if q.is_zero() {
        return 0.0;
    }
    match q.abs().to_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v.ln(),
        _ => q.bits() as f64 * std::f64::consts::LN_2,
    }
}

/// Sieve one block: approximate log of Q(a) = a² - n per position, minus
/// ln(p) at every position hit by a factor base root, then exact trial
/// division on the positions whose residual falls below the threshold.
pub fn sieve_block(n: &BigInt, fb: &FactorBase, block: &SieveBlock) -> Vec<Relation> {
    let size = block.size();
    let start_a = &block.center - BigInt::from(block.half_width);

    let mut q_values = Vec::with_capacity(size);
    let mut logs = vec![0.0f64; size];
    for (i, log) in logs.iter_mut().enumerate() {
        let a = &start_a + BigInt::from(i);
        let q = &a * &a - n;
        *log = log_magnitude(&q);
        q_values.push(q);
    }

    for fp in &fb.primes {
        let p_big = BigInt::from(fp.p);
        let stride = fp.p as usize;
        for &root in &fp.roots {
            // first index i with start_a + i ≡ root (mod p)
            let offset = (BigInt::from(root) - &start_a).mod_floor(&p_big);
            let mut i = offset.to_usize().unwrap_or(size);
            while i < size {
                logs[i] -= fp.log_p;
                i += stride;
            }
        }
    }

    let candidates: Vec<(BigInt, BigInt)> = (0..size)
        .filter(|&i| !q_values[i].is_zero() && logs[i] <= LOG_THRESHOLD)
        .map(|i| (&start_a + BigInt::from(i), q_values[i].clone()))
        .collect();
    trace!(
        "block at {}: {} candidate positions of {}",
        block.center,
        candidates.len(),
        size
    );

    candidates
        .into_par_iter()
        .filter_map(|(a, q)| {
            trial_divide(&q, fb).map(|exponents| Relation { a, q, exponents })
        })
        .collect()
}

/// Exact smoothness check: factor q over the base, accepting only a full
/// reduction to 1. The -1 key records the sign.
fn trial_divide(q: &BigInt, fb: &FactorBase) -> Option<BTreeMap<i64, u32>> {
    if q.is_zero() {
        return None;
    }
    let mut exponents = BTreeMap::new();
    if q.is_negative() {
        exponents.insert(-1, 1);
    }
    let mut remaining = q.abs();
    for fp in &fb.primes {
        let p = BigInt::from(fp.p);
        if remaining.is_multiple_of(&p) {
            let mut e = 0u32;
            while remaining.is_multiple_of(&p) {
                remaining /= &p;
                e += 1;
            }
            exponents.insert(fp.p as i64, e);
        }
        if remaining.is_one() {
            break;
        }
    }
    if remaining.is_one() {
        Some(exponents)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trial_divide_smooth_value() {
        let fb = FactorBase::build(&BigInt::from(1037), 50);
        // Q(7) = 49 - 1037 = -988 = -(2^2 * 13 * 19)
        let exps = trial_divide(&BigInt::from(-988), &fb).expect("-988 is 50-smooth");
        assert_eq!(exps[&-1], 1);
        assert_eq!(exps[&2], 2);
        assert_eq!(exps[&13], 1);
        assert_eq!(exps[&19], 1);
    }

    #[test]
    fn test_trial_divide_rejects_rough_value() {
        let fb = FactorBase::build(&BigInt::from(1037), 50);
        // 2 * 101: the cofactor 101 exceeds the bound
        assert!(trial_divide(&BigInt::from(202), &fb).is_none());
    }

    #[test]
    fn test_sieved_relations_expand_to_q() {
        let n = BigInt::from(1037);
        let fb = FactorBase::build(&n, 1000);
        let block = SieveBlock {
            center: n.sqrt(),
            half_width: 500,
        };
        let relations = sieve_block(&n, &fb, &block);
        assert!(!relations.is_empty());
        for rel in &relations {
            assert_eq!(&rel.a * &rel.a - &n, rel.q);
            assert_eq!(rel.expand(), rel.q.abs());
            let has_sign = rel.exponents.contains_key(&-1);
            assert_eq!(has_sign, rel.q.is_negative());
        }
    }

    #[test]
    fn test_block_advancement() {
        let block = SieveBlock {
            center: BigInt::from(32),
            half_width: 10,
        };
        assert_eq!(block.size(), 21);
        assert_eq!(block.next_center(), BigInt::from(53));
    }
}
