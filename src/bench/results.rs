// src/bench/results.rs

use crate::attack::Extra;
use num::BigInt;

/// One timed attack on one modulus, as recorded by the harness.
///
/// Invariant: success implies p and q are set with p * q == n; failure
/// implies both are None.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResult {
    pub key_bits: u32,
    pub n: BigInt,
    pub success: bool,
    pub p: Option<BigInt>,
    pub q: Option<BigInt>,
    pub elapsed_seconds: f64,
    pub extra: Extra,
}

impl AttackResult {
    pub fn failure(key_bits: u32, n: BigInt, elapsed_seconds: f64, extra: Extra) -> Self {
        AttackResult {
            key_bits,
            n,
            success: false,
            p: None,
            q: None,
            elapsed_seconds,
            extra,
        }
    }

    pub fn success(
        key_bits: u32,
        n: BigInt,
        p: BigInt,
        q: BigInt,
        elapsed_seconds: f64,
        extra: Extra,
    ) -> Self {
        AttackResult {
            key_bits,
            n,
            success: true,
            p: Some(p),
            q: Some(q),
            elapsed_seconds,
            extra,
        }
    }

    /// Equality over everything except wall-clock time; used to compare
    /// runs under a fixed seed.
    pub fn same_outcome(&self, other: &AttackResult) -> bool {
        self.key_bits == other.key_bits
            && self.n == other.n
            && self.success == other.success
            && self.p == other.p
            && self.q == other.q
            && self.extra == other.extra
    }
}
