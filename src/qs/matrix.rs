// src/qs/matrix.rs
//
// Exponent-parity matrix over GF(2) with combination tracking: every
// row carries a mask of the original relations XOR-ed into it, so a row
// eliminated to zero hands back the dependency directly.

use crate::qs::factor_base::FactorBase;
use crate::qs::relations::Relation;
use bitvec::prelude::*;
use log::debug;
use std::collections::HashMap;

/// A subset of relations whose combined exponent vector is all-even,
/// indexed by position in the relation list.
pub type DependencyMask = BitVec;

/// dst ^= src, bit by bit. Both vectors must have equal length.
pub(crate) fn xor_in_place(dst: &mut BitVec, src: &BitVec) {
    debug_assert_eq!(dst.len(), src.len());
    for i in src.iter_ones() {
        let flipped = !dst[i];
        dst.set(i, flipped);
    }
}

/// Column space of the parity matrix: the sign pseudo-prime -1 first when
/// any relation carries it, then the factor base primes in order.
pub fn column_layout(relations: &[Relation], fb: &FactorBase) -> Vec<i64> {
    let mut columns = Vec::with_capacity(fb.len() + 1);
    if relations.iter().any(|r| r.exponents.contains_key(&-1)) {
        columns.push(-1);
    }
    columns.extend(fb.primes.iter().map(|fp| fp.p as i64));
    columns
}

pub struct Gf2Matrix {
    rows: Vec<BitVec>,
    tracking: Vec<DependencyMask>,
    ncols: usize,
}

impl Gf2Matrix {
    /// One row per relation; bit set where the column's exponent is odd.
    pub fn from_relations(relations: &[Relation], columns: &[i64]) -> Self {
        let column_index: HashMap<i64, usize> = columns
            .iter()
            .enumerate()
            .map(|(i, &p)| (p, i))
            .collect();
        let nrows = relations.len();

        let mut rows = Vec::with_capacity(nrows);
        let mut tracking = Vec::with_capacity(nrows);
        for (r, relation) in relations.iter().enumerate() {
            let mut row: BitVec = bitvec![0; columns.len()];
            for (&p, &e) in &relation.exponents {
                if e % 2 == 1 {
                    if let Some(&i) = column_index.get(&p) {
                        row.set(i, true);
                    }
                }
            }
            let mut mask: DependencyMask = bitvec![0; nrows];
            mask.set(r, true);
            rows.push(row);
            tracking.push(mask);
        }

        Gf2Matrix {
            rows,
            tracking,
            ncols: columns.len(),
        }
    }

    /// Gaussian elimination across columns. Every row reduced to zero
    /// yields its tracking mask as a dependency.
    pub fn eliminate(mut self) -> Vec<DependencyMask> {
        let nrows = self.rows.len();
        let mut pivot = 0usize;

        for col in 0..self.ncols {
            if pivot >= nrows {
                break;
            }
            let selected = match (pivot..nrows).find(|&r| self.rows[r][col]) {
                Some(r) => r,
                None => continue,
            };
            self.rows.swap(pivot, selected);
            self.tracking.swap(pivot, selected);

            let pivot_row = self.rows[pivot].clone();
            let pivot_mask = self.tracking[pivot].clone();
            for r in 0..nrows {
                if r != pivot && self.rows[r][col] {
                    xor_in_place(&mut self.rows[r], &pivot_row);
                    xor_in_place(&mut self.tracking[r], &pivot_mask);
                }
            }
            pivot += 1;
        }

        let dependencies: Vec<DependencyMask> = self
            .rows
            .iter()
            .zip(&self.tracking)
            .filter(|(row, _)| row.not_any())
            .map(|(_, mask)| mask.clone())
            .collect();
        debug!(
            "elimination: {} rows, {} cols, {} dependencies",
            nrows, self.ncols, dependencies.len()
        );
        dependencies
    }
}
