// src/attack/mod.rs
//
// The pluggable attack contract. Every strategy is a pure function of
// (n, e, its own config, the shared RNG handle): no state is retained
// between calls, so any invocation is independently restartable.

pub mod fermat;
pub mod pollard_pm1;
pub mod pollard_rho;
pub mod quadratic_sieve;
pub mod trial_division;

use crate::core::BenchRng;
use num::BigInt;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Algorithm-specific diagnostics attached to an outcome. Purely
/// informational; never required for correctness. BTreeMap keeps the
/// rendering order deterministic.
pub type Extra = BTreeMap<String, Value>;

/// Tagged outcome fixed at the contract boundary: either a factor pair
/// with diagnostics, or a structured miss. Resource exhaustion is a
/// `NotFound`, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum FactorOutcome {
    Found { p: BigInt, q: BigInt, extra: Extra },
    NotFound { extra: Extra },
}

impl FactorOutcome {
    pub fn found(p: BigInt, q: BigInt, extra: Extra) -> Self {
        FactorOutcome::Found { p, q, extra }
    }

    pub fn not_found(extra: Extra) -> Self {
        FactorOutcome::NotFound { extra }
    }
}

/// Fatal strategy failures. The harness records these and moves on to the
/// next modulus; they never abort a benchmark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttackError {
    /// The input violates the strategy's preconditions.
    BadInput(String),
    /// Unexpected internal failure.
    Internal(String),
}

impl fmt::Display for AttackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttackError::BadInput(msg) => write!(f, "bad input: {}", msg),
            AttackError::Internal(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AttackError {}

/// The strategy contract consumed by the benchmark harness.
pub trait AttackStrategy {
    fn name(&self) -> &'static str;

    /// Attempt to factor n. The harness bounds running time through each
    /// strategy's own configuration; implementations must enforce their
    /// iteration/relation caps rather than run unbounded.
    fn attack(
        &self,
        n: &BigInt,
        e: &BigInt,
        rng: &mut BenchRng,
    ) -> Result<FactorOutcome, AttackError>;
}

/// Look a strategy up by its CLI name.
pub fn strategy_by_name(
    name: &str,
    config: &crate::config::BenchConfig,
) -> Option<Box<dyn AttackStrategy>> {
    match name {
        "trial_division" | "trial-division" => Some(Box::new(trial_division::TrialDivision::new(
            config.trial_division.clone(),
        ))),
        "fermat" => Some(Box::new(fermat::Fermat::new(config.fermat.clone()))),
        "pollard_rho" | "rho" => Some(Box::new(pollard_rho::PollardRho::new(
            config.pollard_rho.clone(),
        ))),
        "pollard_pm1" | "p-1" => Some(Box::new(pollard_pm1::PollardPm1::new(
            config.pollard_pm1.clone(),
        ))),
        "quadratic_sieve" | "qs" => Some(Box::new(quadratic_sieve::QuadraticSieve::new(
            config.qs.clone(),
        ))),
        _ => None,
    }
}

/// Names accepted by `strategy_by_name`, for CLI error messages.
pub const STRATEGY_NAMES: [&str; 5] = [
    "trial_division",
    "fermat",
    "pollard_rho",
    "pollard_pm1",
    "quadratic_sieve",
];
