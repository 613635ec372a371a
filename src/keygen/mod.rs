// src/keygen/mod.rs
//
// RSA-analog key synthesis used as the benchmark's modulus source. Keys
// here are deliberately small; this exists to feed attacks, not to be
// secure.

use crate::core::BenchRng;
use crate::integer_math::gcd::{gcd, mod_inverse};
use crate::integer_math::primes::is_probable_prime;
use log::{debug, info};
use num::{BigInt, One, ToPrimitive};

/// Smallest supported key size: two distinct 3-bit primes.
pub const MIN_KEY_BITS: u32 = 6;

/// What an attack strategy sees: the public half of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modulus {
    pub n: BigInt,
    pub e: BigInt,
    /// Actual bit length of n.
    pub bits: u32,
}

/// A full generated key, kept around so validity properties are testable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsaKey {
    /// Requested key size in bits.
    pub bits: u32,
    pub p: BigInt,
    pub q: BigInt,
    pub n: BigInt,
    pub phi: BigInt,
    pub e: BigInt,
    pub d: BigInt,
}

impl RsaKey {
    pub fn modulus(&self) -> Modulus {
        Modulus {
            n: self.n.clone(),
            e: self.e.clone(),
            bits: self.n.bits() as u32,
        }
    }
}

/// Source of benchmark moduli. Deterministic under a fixed RNG seed.
pub trait PrimeSource {
    fn generate(&mut self, bit_length: u32) -> Modulus;
}

#[derive(Debug, Clone)]
pub struct RsaKeyGen {
    pub base_e: u64,
}

impl Default for RsaKeyGen {
    fn default() -> Self {
        RsaKeyGen { base_e: 65537 }
    }
}

impl RsaKeyGen {
    pub fn new(base_e: u64) -> Self {
        RsaKeyGen { base_e }
    }

    /// Generate a key with primes of `bits/2` and `bits - bits/2` bits.
    pub fn generate(&self, bits: u32, rng: &mut BenchRng) -> RsaKey {
        assert!(
            bits >= MIN_KEY_BITS,
            "key size must be at least {} bits, got {}",
            MIN_KEY_BITS,
            bits
        );
        let half = bits / 2;

        let p = Self::generate_prime(half, rng);
        let mut q = Self::generate_prime(bits - half, rng);
        while q == p {
            q = Self::generate_prime(bits - half, rng);
        }

        let n = &p * &q;
        let phi = (&p - 1u32) * (&q - 1u32);

        let mut e = BigInt::from(self.base_e);
        while !gcd(&e, &phi).is_one() {
            e += 2u32;
        }
        // e is coprime with phi, so the inverse exists
        let d = mod_inverse(&e, &phi).unwrap_or_else(BigInt::one);

        info!("generated {}-bit key: n = {}", bits, n);
        debug!("  p = {}, q = {}, e = {}", p, q, e);

        RsaKey {
            bits,
            p,
            q,
            n,
            phi,
            e,
            d,
        }
    }

    /// Probable prime with exactly `bits` bits: top bit forced so the
    /// width is exact, low bit forced so the candidate is odd.
    fn generate_prime(bits: u32, rng: &mut BenchRng) -> BigInt {
        assert!(bits >= 2, "prime width must be at least 2 bits");
        let top_bit = BigInt::one() << (bits as usize - 1);
        loop {
            let candidate = rng.next_bits(bits) | &top_bit | BigInt::one();
            if is_probable_prime(&candidate) {
                return candidate;
            }
        }
    }
}

/// A key generator bound to its own RNG handle, exposed through the
/// `PrimeSource` contract the harness consumes.
pub struct RsaPrimeSource {
    keygen: RsaKeyGen,
    rng: BenchRng,
}

impl RsaPrimeSource {
    pub fn new(keygen: RsaKeyGen, rng: BenchRng) -> Self {
        RsaPrimeSource { keygen, rng }
    }
}

impl PrimeSource for RsaPrimeSource {
    fn generate(&mut self, bit_length: u32) -> Modulus {
        self.keygen.generate(bit_length, &mut self.rng).modulus()
    }
}
