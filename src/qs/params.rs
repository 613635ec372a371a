// src/qs/params.rs

use num::{BigInt, ToPrimitive};

/// Smoothness bound clamp range.
pub const B_MIN: u64 = 5_000;
pub const B_MAX: u64 = 50_000;

/// Sieve half-width as a multiple of the smoothness bound.
pub const M_PER_B: u64 = 40;

/// Residual log below which a sieve position becomes a smoothness
/// candidate (confirmed by exact trial division afterwards).
pub const LOG_THRESHOLD: f64 = 1.8;

/// Relations collected beyond the factor base size, so the parity matrix
/// is over-determined.
pub const RELATION_MARGIN: usize = 30;

/// Hard cap on sieved blocks per run.
pub const MAX_BLOCKS: u64 = 2_000;

/// Bounded retries for growing B and M when a block yields nothing.
pub const MAX_ADAPTIVE: u32 = 8;

/// Growth factors applied on starvation.
pub const M_GROWTH: f64 = 1.5;
pub const B_GROWTH: f64 = 1.1;

/// Sieve parameters for one run, either heuristic or overridden.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QsParams {
    /// Smoothness bound.
    pub b: u64,
    /// Sieve half-width.
    pub m: u64,
}

impl QsParams {
    /// Heuristic selection from ln(n): B ≈ exp(0.56 * sqrt(ln n * ln ln n))
    /// clamped to [B_MIN, B_MAX], M = 40 * B.
    pub fn select(n: &BigInt) -> Self {
        let ln_n = ln_of(n);
        let b = if ln_n > 1.0 {
            let estimate = (0.56 * (ln_n * ln_n.ln()).sqrt()).exp() as u64;
            estimate.clamp(B_MIN, B_MAX)
        } else {
            B_MIN
        };
        QsParams { b, m: b * M_PER_B }
    }

    pub fn grow(&self) -> Self {
        QsParams {
            b: (self.b as f64 * B_GROWTH) as u64,
            m: (self.m as f64 * M_GROWTH) as u64,
        }
    }
}

/// ln(n), falling back to bit length when n exceeds f64 range.
pub fn ln_of(n: &BigInt) -> f64 {
    match n.to_f64() {
        Some(v) if v.is_finite() && v > 0.0 => v.ln(),
        _ => n.bits() as f64 * std::f64::consts::LN_2,
    }
}
