// src/qs/relations.rs

use num::{BigInt, One};
use std::collections::{BTreeMap, HashSet};

/// One smooth relation: Q = a² - n factors completely over the factor
/// base. The exponent key -1 flags a negative Q; all other keys are
/// factor base primes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    pub a: BigInt,
    pub q: BigInt,
    pub exponents: BTreeMap<i64, u32>,
}

impl Relation {
    /// Multiply the exponent map back out (sign excluded); equals |Q| for
    /// a valid relation.
    pub fn expand(&self) -> BigInt {
        let mut acc = BigInt::one();
        for (&p, &e) in &self.exponents {
            if p == -1 {
                continue;
            }
            acc *= num::pow(BigInt::from(p), e as usize);
        }
        acc
    }
}

/// Accumulates relations up to a target count, deduplicating by sieve
/// position.
#[derive(Debug, Default)]
pub struct RelationStore {
    relations: Vec<Relation>,
    seen: HashSet<BigInt>,
    target: usize,
}

impl RelationStore {
    pub fn new(target: usize) -> Self {
        RelationStore {
            relations: Vec::new(),
            seen: HashSet::new(),
            target,
        }
    }

    pub fn set_target(&mut self, target: usize) {
        self.target = target;
    }

    pub fn target(&self) -> usize {
        self.target
    }

    /// Insert unless the position was already collected or the store is
    /// full. Returns whether the relation was kept.
    pub fn push(&mut self, relation: Relation) -> bool {
        if self.is_full() || self.seen.contains(&relation.a) {
            return false;
        }
        self.seen.insert(relation.a.clone());
        self.relations.push(relation);
        true
    }

    pub fn len(&self) -> usize {
        self.relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.relations.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.relations.len() >= self.target
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }
}
