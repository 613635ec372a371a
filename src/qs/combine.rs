// src/qs/combine.rs
//
// Turn a dependency into a congruence of squares X² ≡ Y² (mod n) and
// extract gcd(X - Y, n). When the zero-row dependencies all collapse to
// X ≡ ±Y, synthesize extra candidate masks from XOR pairs and random
// relation subsets, bounded by fixed trial budgets.

use crate::core::BenchRng;
use crate::integer_math::gcd::gcd;
use crate::qs::matrix::{xor_in_place, DependencyMask};
use crate::qs::relations::Relation;
use bitvec::prelude::*;
use log::debug;
use num::{BigInt, Integer, One};
use std::collections::{BTreeMap, HashSet};

/// XOR-pair trials are capped at min of this and 5x the dependency count.
const MAX_PAIR_TRIALS: usize = 200;

/// Random-subset trials.
const SUBSET_TRIALS: usize = 400;

/// X = prod a_i mod n over the selected relations, Y = prod p^(e_p/2)
/// mod n over their combined exponents, sign folded into Y.
pub fn combine(mask: &DependencyMask, relations: &[Relation], n: &BigInt) -> (BigInt, BigInt) {
    let mut total: BTreeMap<i64, u32> = BTreeMap::new();
    let mut x = BigInt::one().mod_floor(n);
    for i in mask.iter_ones() {
        let relation = &relations[i];
        x = (x * relation.a.mod_floor(n)).mod_floor(n);
        for (&p, &e) in &relation.exponents {
            *total.entry(p).or_insert(0) += e;
        }
    }

    let mut y = BigInt::one().mod_floor(n);
    for (&p, &e) in &total {
        let half = e / 2;
        if p == -1 {
            if half % 2 == 1 {
                y = (-y).mod_floor(n);
            }
            continue;
        }
        if half > 0 {
            y = (y * BigInt::from(p).modpow(&BigInt::from(half), n)).mod_floor(n);
        }
    }
    (x, y)
}

/// gcd(X - Y, n) when it lands strictly between 1 and n.
pub fn extract_factor(x: &BigInt, y: &BigInt, n: &BigInt) -> Option<BigInt> {
    let g = gcd(&(x - y), n);
    if g > BigInt::one() && &g < n {
        Some(g)
    } else {
        None
    }
}

/// Candidate masks beyond the zero-row dependencies: XOR combinations of
/// dependency pairs, then random small subsets of the relation list.
pub fn fallback_masks(
    dependencies: &[DependencyMask],
    relation_count: usize,
    column_count: usize,
    rng: &mut BenchRng,
) -> Vec<DependencyMask> {
    let mut masks = Vec::new();

    if dependencies.len() >= 2 {
        let budget = MAX_PAIR_TRIALS.min(dependencies.len() * 5);
        for _ in 0..budget {
            let picked = rng.sample_indices(dependencies.len(), 2);
            let mut combined = dependencies[picked[0]].clone();
            xor_in_place(&mut combined, &dependencies[picked[1]]);
            masks.push(combined);
        }
    }

    if relation_count >= 2 {
        let hi = relation_count.min(5.max(column_count / 2)).max(2);
        for _ in 0..SUBSET_TRIALS {
            let k = rng.next_range(2, hi as u64 + 1) as usize;
            let mut mask: DependencyMask = bitvec![0; relation_count];
            for idx in rng.sample_indices(relation_count, k) {
                let flipped = !mask[idx];
                mask.set(idx, flipped);
            }
            masks.push(mask);
        }
    }

    debug!("fallback: {} synthesized masks", masks.len());
    masks
}

/// Run every mask through combine/extract, skipping repeats.
pub fn try_masks(
    masks: &[DependencyMask],
    relations: &[Relation],
    n: &BigInt,
) -> Option<BigInt> {
    let mut visited: HashSet<DependencyMask> = HashSet::new();
    for mask in masks {
        if !visited.insert(mask.clone()) {
            continue;
        }
        let (x, y) = combine(mask, relations, n);
        if let Some(g) = extract_factor(&x, &y, n) {
            return Some(g);
        }
    }
    None
}
