// src/integer_math/legendre.rs

use num::{BigInt, Integer, One, Zero};

/// Legendre symbol (a | p) for an odd prime p, computed by Euler's
/// criterion: a^((p-1)/2) mod p. Returns 1 for a quadratic residue,
/// -1 for a non-residue, 0 when p divides a.
pub fn legendre_symbol(a: &BigInt, p: &BigInt) -> i32 {
    let reduced = a.mod_floor(p);
    if reduced.is_zero() {
        return 0;
    }
    let exp: BigInt = (p - 1u32) >> 1;
    let result = reduced.modpow(&exp, p);
    if result.is_one() {
        1
    } else {
        -1
    }
}

/// True when a is a (nonzero) quadratic residue mod p.
pub fn is_quadratic_residue(a: &BigInt, p: &BigInt) -> bool {
    legendre_symbol(a, p) == 1
}
