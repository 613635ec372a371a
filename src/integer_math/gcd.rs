// src/integer_math/gcd.rs

use num::{BigInt, Integer, One};

/// Greatest common divisor. Always non-negative.
pub fn gcd(left: &BigInt, right: &BigInt) -> BigInt {
    left.gcd(right)
}

/// Modular inverse of `a` modulo `modulus`, if `gcd(a, modulus) == 1`.
pub fn mod_inverse(a: &BigInt, modulus: &BigInt) -> Option<BigInt> {
    let ext = a.extended_gcd(modulus);
    if !ext.gcd.is_one() {
        return None;
    }
    Some(ext.x.mod_floor(modulus))
}
