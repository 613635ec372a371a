// src/integer_math/tonelli.rs

use crate::integer_math::legendre::legendre_symbol;
use num::{BigInt, Integer, One, ToPrimitive, Zero};

/// Tonelli-Shanks: solve x² ≡ n (mod p) for prime p.
///
/// Returns the roots in [0, p): zero roots when n is a non-residue, one
/// when the two roots coincide (n ≡ 0 or r == p - r), two otherwise.
/// p ≡ 3 (mod 4) takes the direct n^((p+1)/4) path; the general case
/// searches a quadratic non-residue and reduces the order iteratively.
pub fn sqrt_mod_prime(n: &BigInt, p: u64) -> Vec<u64> {
    let p_big = BigInt::from(p);
    let n_mod = n.mod_floor(&p_big);

    if n_mod.is_zero() {
        return vec![0];
    }
    if p == 2 {
        return vec![n_mod.to_u64().unwrap_or(0)];
    }
    if legendre_symbol(&n_mod, &p_big) != 1 {
        return Vec::new();
    }

    if p % 4 == 3 {
        let root = n_mod.modpow(&BigInt::from((p + 1) / 4), &p_big);
        return both_roots(root.to_u64().unwrap_or(0), p);
    }

    // Write p - 1 = q * 2^s with q odd
    let mut q = p - 1;
    let mut s = 0u32;
    while q % 2 == 0 {
        q /= 2;
        s += 1;
    }

    // Find a quadratic non-residue z
    let mut z = 2u64;
    while legendre_symbol(&BigInt::from(z), &p_big) != -1 {
        z += 1;
    }

    let q_big = BigInt::from(q);
    let mut m = s;
    let mut c = BigInt::from(z).modpow(&q_big, &p_big);
    let mut t = n_mod.modpow(&q_big, &p_big);
    let mut r = n_mod.modpow(&((&q_big + 1u32) >> 1), &p_big);

    loop {
        if t.is_zero() {
            return vec![0];
        }
        if t.is_one() {
            return both_roots(r.to_u64().unwrap_or(0), p);
        }

        // Least i such that t^(2^i) == 1
        let mut i = 1u32;
        let mut t2i = (&t * &t).mod_floor(&p_big);
        while !t2i.is_one() && i < m {
            t2i = (&t2i * &t2i).mod_floor(&p_big);
            i += 1;
        }
        if i >= m {
            // n was not a residue after all
            return Vec::new();
        }

        let b = c.modpow(&BigInt::from(2).pow(m - i - 1), &p_big);
        m = i;
        c = (&b * &b).mod_floor(&p_big);
        t = (&t * &c).mod_floor(&p_big);
        r = (&r * &b).mod_floor(&p_big);
    }
}

fn both_roots(r: u64, p: u64) -> Vec<u64> {
    let other = (p - r) % p;
    if other == r {
        vec![r]
    } else {
        vec![r, other]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_roots_valid(n: u64, p: u64) {
        let n_big = BigInt::from(n);
        let p_big = BigInt::from(p);
        let roots = sqrt_mod_prime(&n_big, p);
        assert!(!roots.is_empty(), "expected roots of {} mod {}", n, p);
        for r in roots {
            let r_big = BigInt::from(r);
            assert_eq!(
                (&r_big * &r_big).mod_floor(&p_big),
                n_big.mod_floor(&p_big),
                "root {} does not satisfy x² ≡ {} (mod {})",
                r,
                n,
                p
            );
        }
    }

    #[test]
    fn test_p_congruent_3_mod_4() {
        assert_roots_valid(2, 7); // roots 3 and 4
        assert_roots_valid(4, 11);
        assert_roots_valid(10, 19);
    }

    #[test]
    fn test_general_case() {
        // p ≡ 1 (mod 4) exercises the full algorithm
        assert_roots_valid(2, 17);
        assert_roots_valid(5, 29);
        assert_roots_valid(10, 13);
        assert_roots_valid(1037, 37);
    }

    #[test]
    fn test_non_residue_has_no_roots() {
        assert!(sqrt_mod_prime(&BigInt::from(3), 7).is_empty());
        assert!(sqrt_mod_prime(&BigInt::from(5), 13).is_empty());
    }

    #[test]
    fn test_zero_residue() {
        assert_eq!(sqrt_mod_prime(&BigInt::from(49), 7), vec![0]);
    }

    #[test]
    fn test_root_count() {
        // Two distinct roots for a proper residue
        let roots = sqrt_mod_prime(&BigInt::from(2), 7);
        assert_eq!(roots.len(), 2);
    }
}
