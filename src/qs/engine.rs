// src/qs/engine.rs
//
// Drives one quadratic sieve run as an explicit state machine. Every
// transition count is bounded: blocks by max_blocks, parameter growth by
// max_adaptive, extraction by the fallback trial budgets.

use crate::core::BenchRng;
use crate::qs::combine::{fallback_masks, try_masks};
use crate::qs::factor_base::FactorBase;
use crate::qs::matrix::{column_layout, DependencyMask, Gf2Matrix};
use crate::qs::params::{QsParams, MAX_ADAPTIVE, MAX_BLOCKS, RELATION_MARGIN};
use crate::qs::relations::RelationStore;
use crate::qs::sieve::{sieve_block, SieveBlock};
use log::{debug, info};
use num::{BigInt, Integer};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QsConfig {
    /// Smoothness bound override; heuristic from ln(n) when unset.
    pub b: Option<u64>,
    /// Sieve half-width override; 40 * B when unset.
    pub m: Option<u64>,
    /// Relation target override; factor base size + margin when unset.
    pub max_rel: Option<usize>,
    pub max_blocks: u64,
    pub max_adaptive: u32,
}

impl Default for QsConfig {
    fn default() -> Self {
        QsConfig {
            b: None,
            m: None,
            max_rel: None,
            max_blocks: MAX_BLOCKS,
            max_adaptive: MAX_ADAPTIVE,
        }
    }
}

/// Phases of one run. Transitions:
/// Sieving -> Collecting (block yielded relations) | AdaptiveGrow (starved)
/// Collecting -> Sieving (next block) | Eliminating (target or block cap)
/// AdaptiveGrow -> Sieving (grown) | Eliminating | Exhausted (out of tries)
/// Eliminating -> Extracting | Exhausted (no relations)
/// Extracting -> done | Exhausted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QsState {
    Sieving,
    AdaptiveGrow,
    Collecting,
    Eliminating,
    Extracting,
    Exhausted,
}

/// Run diagnostics, reported on success and failure alike.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QsStats {
    pub b: u64,
    pub m: u64,
    pub fb_size: usize,
    pub relations: usize,
    pub blocks: u64,
    pub dependencies: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QsOutcome {
    pub factor: Option<BigInt>,
    pub stats: QsStats,
}

pub struct QuadraticSieveEngine {
    config: QsConfig,
}

impl QuadraticSieveEngine {
    pub fn new(config: QsConfig) -> Self {
        QuadraticSieveEngine { config }
    }

    /// Find a nontrivial factor of composite n, or report failure with
    /// diagnostics after all dependencies and fallback trials are spent.
    pub fn factor(&self, n: &BigInt, rng: &mut BenchRng) -> QsOutcome {
        if n.is_even() {
            return QsOutcome {
                factor: Some(BigInt::from(2)),
                stats: QsStats::default(),
            };
        }
        let sqrt_n = n.sqrt();
        if &(&sqrt_n * &sqrt_n) == n {
            return QsOutcome {
                factor: Some(sqrt_n),
                stats: QsStats::default(),
            };
        }

        let mut params = {
            let heuristic = QsParams::select(n);
            let b = self.config.b.unwrap_or(heuristic.b);
            QsParams {
                b,
                m: self.config.m.unwrap_or(b * crate::qs::params::M_PER_B),
            }
        };
        let mut fb = FactorBase::build(n, params.b);
        let target = self.config.max_rel.unwrap_or(fb.len() + RELATION_MARGIN);
        info!(
            "qs: n = {}, B = {}, M = {}, fb size = {}, target = {} relations",
            n,
            params.b,
            params.m,
            fb.len(),
            target
        );

        let mut store = RelationStore::new(target);
        let mut block = SieveBlock {
            center: sqrt_n,
            half_width: params.m,
        };
        let mut stats = QsStats {
            b: params.b,
            m: params.m,
            fb_size: fb.len(),
            ..QsStats::default()
        };
        let mut adaptive_tries = 0u32;
        let mut dependencies: Vec<DependencyMask> = Vec::new();
        let mut column_count = 0usize;
        let mut state = QsState::Sieving;

        loop {
            state = match state {
                QsState::Sieving => {
                    let found = sieve_block(n, &fb, &block);
                    stats.blocks += 1;
                    debug!(
                        "qs: block {} at {} gave {} smooth relations ({} / {})",
                        stats.blocks,
                        block.center,
                        found.len(),
                        store.len(),
                        target
                    );
                    if found.is_empty() {
                        QsState::AdaptiveGrow
                    } else {
                        for relation in found {
                            store.push(relation);
                        }
                        QsState::Collecting
                    }
                }
                QsState::Collecting => {
                    if store.is_full() || stats.blocks >= self.config.max_blocks {
                        QsState::Eliminating
                    } else {
                        block = SieveBlock {
                            center: block.next_center(),
                            half_width: block.half_width,
                        };
                        QsState::Sieving
                    }
                }
                QsState::AdaptiveGrow => {
                    if adaptive_tries < self.config.max_adaptive {
                        adaptive_tries += 1;
                        params = params.grow();
                        fb = FactorBase::build(n, params.b);
                        block.half_width = params.m;
                        stats.b = params.b;
                        stats.m = params.m;
                        stats.fb_size = fb.len();
                        info!(
                            "qs: starved block, grown to B = {}, M = {} (try {} of {})",
                            params.b, params.m, adaptive_tries, self.config.max_adaptive
                        );
                        // retry at the same center with the larger window
                        QsState::Sieving
                    } else if store.is_empty() {
                        QsState::Exhausted
                    } else {
                        QsState::Eliminating
                    }
                }
                QsState::Eliminating => {
                    stats.relations = store.len();
                    if store.is_empty() {
                        QsState::Exhausted
                    } else {
                        let columns = column_layout(store.relations(), &fb);
                        column_count = columns.len();
                        dependencies =
                            Gf2Matrix::from_relations(store.relations(), &columns).eliminate();
                        stats.dependencies = dependencies.len();
                        QsState::Extracting
                    }
                }
                QsState::Extracting => {
                    if let Some(g) = try_masks(&dependencies, store.relations(), n) {
                        info!("qs: nontrivial factor {}", g);
                        return QsOutcome {
                            factor: Some(g),
                            stats,
                        };
                    }
                    let synthesized =
                        fallback_masks(&dependencies, store.len(), column_count, rng);
                    if let Some(g) = try_masks(&synthesized, store.relations(), n) {
                        info!("qs: nontrivial factor {} (fallback mask)", g);
                        return QsOutcome {
                            factor: Some(g),
                            stats,
                        };
                    }
                    QsState::Exhausted
                }
                QsState::Exhausted => {
                    stats.relations = store.len();
                    info!(
                        "qs: exhausted without a factor ({} relations, {} blocks, {} dependencies)",
                        stats.relations, stats.blocks, stats.dependencies
                    );
                    return QsOutcome {
                        factor: None,
                        stats,
                    };
                }
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(config: QsConfig) -> QuadraticSieveEngine {
        QuadraticSieveEngine::new(config)
    }

    #[test]
    fn test_factors_1037_with_default_heuristics() {
        let mut rng = BenchRng::seeded(42);
        let outcome = engine(QsConfig::default()).factor(&BigInt::from(1037), &mut rng);
        let g = outcome.factor.expect("1037 should factor in one run");
        assert!(g == BigInt::from(17) || g == BigInt::from(61));
        assert_eq!(outcome.stats.blocks, 1);
        assert_eq!(outcome.stats.b, 5000);
        assert_eq!(outcome.stats.m, 200_000);
    }

    #[test]
    fn test_factors_with_small_overrides() {
        let config = QsConfig {
            b: Some(200),
            m: Some(2000),
            ..QsConfig::default()
        };
        for n in [10403u64, 8051] {
            let mut rng = BenchRng::seeded(1);
            let outcome = engine(config.clone()).factor(&BigInt::from(n), &mut rng);
            let g = outcome.factor.expect("semiprime should factor");
            let n = BigInt::from(n);
            assert!(n.is_multiple_of(&g));
            assert!(g > BigInt::from(1) && g < n);
        }
    }

    #[test]
    fn test_even_input_is_trivial() {
        let mut rng = BenchRng::seeded(0);
        let outcome = engine(QsConfig::default()).factor(&BigInt::from(1024), &mut rng);
        assert_eq!(outcome.factor, Some(BigInt::from(2)));
        assert_eq!(outcome.stats.blocks, 0);
    }

    #[test]
    fn test_perfect_square_is_trivial() {
        let mut rng = BenchRng::seeded(0);
        let outcome = engine(QsConfig::default()).factor(&BigInt::from(1369), &mut rng);
        assert_eq!(outcome.factor, Some(BigInt::from(37)));
    }

    #[test]
    fn test_prime_input_exhausts_softly() {
        // gcd extraction cannot split a prime; the run must end with
        // diagnostics instead of looping
        let config = QsConfig {
            b: Some(100),
            m: Some(500),
            max_rel: Some(20),
            ..QsConfig::default()
        };
        let mut rng = BenchRng::seeded(5);
        let outcome = engine(config).factor(&BigInt::from(10007), &mut rng);
        assert_eq!(outcome.factor, None);
        assert!(outcome.stats.relations > 0);
        assert!(outcome.stats.blocks >= 1);
    }

    #[test]
    fn test_run_is_deterministic_under_seed() {
        let config = QsConfig {
            b: Some(200),
            m: Some(2000),
            ..QsConfig::default()
        };
        let mut rng_a = BenchRng::seeded(9);
        let mut rng_b = BenchRng::seeded(9);
        let a = engine(config.clone()).factor(&BigInt::from(10403), &mut rng_a);
        let b = engine(config).factor(&BigInt::from(10403), &mut rng_b);
        assert_eq!(a, b);
    }
}
