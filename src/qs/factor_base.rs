// src/qs/factor_base.rs

use crate::integer_math::legendre::is_quadratic_residue;
use crate::integer_math::primes::primes_up_to;
use crate::integer_math::tonelli::sqrt_mod_prime;
use log::debug;
use num::BigInt;

/// A factor base prime together with the data the sieve needs: its log
/// contribution and the roots of x² ≡ n (mod p).
#[derive(Debug, Clone)]
pub struct FactorBasePrime {
    pub p: u64,
    pub log_p: f64,
    pub roots: Vec<u64>,
}

/// Primes p <= B for which n is a quadratic residue (p = 2 is kept
/// unconditionally). Fixed for one sieve run except under adaptive growth.
#[derive(Debug, Clone)]
pub struct FactorBase {
    pub primes: Vec<FactorBasePrime>,
}

impl FactorBase {
    pub fn build(n: &BigInt, bound: u64) -> Self {
        let mut primes = Vec::new();
        for p in primes_up_to(bound) {
            if p != 2 && !is_quadratic_residue(n, &BigInt::from(p)) {
                continue;
            }
            let roots = sqrt_mod_prime(n, p);
            if roots.is_empty() {
                continue;
            }
            primes.push(FactorBasePrime {
                p,
                log_p: (p as f64).ln(),
                roots,
            });
        }
        debug!(
            "factor base: bound {} keeps {} primes",
            bound,
            primes.len()
        );
        FactorBase { primes }
    }

    pub fn len(&self) -> usize {
        self.primes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Integer;

    #[test]
    fn test_every_prime_admits_roots() {
        let n = BigInt::from(1037);
        let fb = FactorBase::build(&n, 100);
        assert!(!fb.is_empty());
        for fp in &fb.primes {
            assert!(!fp.roots.is_empty());
            let p = BigInt::from(fp.p);
            for &r in &fp.roots {
                let r = BigInt::from(r);
                assert_eq!((&r * &r).mod_floor(&p), n.mod_floor(&p));
            }
        }
    }

    #[test]
    fn test_two_is_always_kept() {
        let fb = FactorBase::build(&BigInt::from(1037), 100);
        assert_eq!(fb.primes[0].p, 2);
        assert_eq!(fb.primes[0].roots, vec![1]);
    }

    #[test]
    fn test_non_residue_primes_excluded() {
        // (1037 | 3): 1037 ≡ 2 (mod 3) and 2 is a non-residue mod 3
        let fb = FactorBase::build(&BigInt::from(1037), 100);
        assert!(fb.primes.iter().all(|fp| fp.p != 3));
    }

    #[test]
    fn test_base_grows_with_bound() {
        let n = BigInt::from(1037);
        let small = FactorBase::build(&n, 50);
        let large = FactorBase::build(&n, 500);
        assert!(large.len() > small.len());
    }
}
