// src/qs/mod.rs
//
// Quadratic sieve factorization engine. Composed sequentially: build a
// factor base, sieve blocks for smooth relations, eliminate the exponent
// parity matrix over GF(2), combine dependent relations into a congruence
// of squares and extract a factor via gcd.

pub mod combine;
pub mod engine;
pub mod factor_base;
pub mod matrix;
pub mod params;
pub mod relations;
pub mod sieve;

pub use engine::{QsConfig, QsOutcome, QsStats, QuadraticSieveEngine};
pub use factor_base::{FactorBase, FactorBasePrime};
pub use matrix::DependencyMask;
pub use relations::Relation;
