// src/core/rng.rs

use num::bigint::Sign;
use num::BigInt;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single random source for the whole benchmark: key generation,
/// Pollard rho restart constants and the sieve's fallback subset sampler
/// all draw from one handle, so a fixed seed reproduces an entire run.
pub struct BenchRng {
    rng: ChaCha8Rng,
}

impl BenchRng {
    pub fn seeded(seed: u64) -> Self {
        BenchRng {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        BenchRng {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Uniform draw in [lower, upper), upper exclusive.
    pub fn next_range(&mut self, lower: u64, upper: u64) -> u64 {
        self.rng.gen_range(lower..upper)
    }

    /// Random integer with exactly `bits` significant bits at most
    /// (high bits above `bits` masked off).
    pub fn next_bits(&mut self, bits: u32) -> BigInt {
        let nbytes = ((bits + 7) / 8) as usize;
        let mut buffer = vec![0u8; nbytes];
        self.rng.fill(&mut buffer[..]);
        let excess = nbytes as u32 * 8 - bits;
        buffer[0] &= 0xffu8 >> excess;
        BigInt::from_bytes_be(Sign::Plus, &buffer)
    }

    /// Uniform BigInt in [lower, upper] by rejection sampling.
    pub fn next_bigint(&mut self, lower: &BigInt, upper: &BigInt) -> BigInt {
        assert!(lower <= upper, "next_bigint: lower > upper");
        let delta = upper - lower;
        let (_, delta_bytes) = delta.to_bytes_be();
        let mut buffer = vec![0u8; delta_bytes.len()];
        loop {
            self.rng.fill(&mut buffer[..]);
            let candidate = BigInt::from_bytes_be(Sign::Plus, &buffer) + lower;
            if &candidate >= lower && &candidate <= upper {
                return candidate;
            }
        }
    }

    /// `amount` distinct indices out of [0, length).
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount).into_vec()
    }
}
