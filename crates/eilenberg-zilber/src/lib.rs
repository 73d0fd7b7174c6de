//! Normalized chains on standard simplices and cubes, and on their tensor powers.
//!
//! A basis element of the `r`-fold tensor power is a [`Tensor`] of `r` cells, and a chain is a
//! [`FormalSum`] of such tensors. The two kinds of cells, [`Simplex`] and [`Cube`], implement
//! [`Cell`], which supplies the three pieces of structure the surjection operad needs to act: the
//! boundary, the iterated diagonal and the join. Everything else about chains is shared and lives
//! in [`ChainElement`].

mod cubical;
mod simplicial;

use std::fmt;
use std::hash::Hash;

use formal_sum::{Basis, FormalSum};
use itertools::Itertools;

pub use cubical::{CubicalEilenbergZilberElement, Cube, Interval};
pub use simplicial::{EilenbergZilberElement, Simplex};

/// `(-1)^exp`
pub(crate) fn minus_one_to_the(exp: usize) -> i64 {
    if exp % 2 == 0 {
        1
    } else {
        -1
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Complex {
    Simplicial,
    Cubical,
}

pub trait Cell: Clone + Eq + Hash + Ord + fmt::Display + Send + Sync {
    const COMPLEX: Complex;

    fn dimension(&self) -> usize;

    fn is_degenerate(&self) -> bool {
        false
    }

    /// The boundary of `self` as a list of signed faces.
    fn faces(&self) -> Vec<(Self, i64)>;

    /// The `times`-fold iterated diagonal of `self`. Every term has `times + 1` factors.
    fn diagonal(&self, times: usize) -> Vec<(Vec<Self>, i64)>;

    /// Joins `cells` into a chain of single cells. The join vanishes exactly when the result is
    /// empty.
    fn join(cells: &[&Self]) -> Vec<(Self, i64)>;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tensor<C>(Vec<C>);

impl<C> Tensor<C> {
    pub fn new(factors: Vec<C>) -> Self {
        Self(factors)
    }

    pub fn factors(&self) -> &[C] {
        &self.0
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }
}

impl<C: Cell> Tensor<C> {
    pub fn degree(&self) -> usize {
        self.0.iter().map(Cell::dimension).sum()
    }
}

impl<C> FromIterator<C> for Tensor<C> {
    fn from_iter<I: IntoIterator<Item = C>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<C: Cell> Basis for Tensor<C> {
    fn is_degenerate(&self) -> bool {
        self.0.iter().any(Cell::is_degenerate)
    }
}

impl<C: fmt::Display> fmt::Display for Tensor<C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(","))
    }
}

/// Operations shared by simplicial and cubical chains.
pub trait ChainElement {
    /// The common number of tensor factors, if there is one.
    fn arity(&self) -> Option<usize>;

    /// The common total dimension, if there is one.
    fn degree(&self) -> Option<usize>;

    fn boundary(&self) -> Self;

    /// Applies the `times`-fold diagonal to the factor at position `coord`, counting from 1.
    fn iterated_diagonal(&self, times: usize, coord: usize) -> Self;
}

fn common<T: PartialEq>(mut values: impl Iterator<Item = T>) -> Option<T> {
    let first = values.next()?;
    values.all(|v| v == first).then_some(first)
}

impl<C: Cell> ChainElement for FormalSum<Tensor<C>> {
    fn arity(&self) -> Option<usize> {
        common(self.keys().map(Tensor::arity))
    }

    fn degree(&self) -> Option<usize> {
        common(self.keys().map(Tensor::degree))
    }

    fn boundary(&self) -> Self {
        let mut result = self.zero();
        for (key, value) in self.iter() {
            let mut preceding = 0;
            for (idx, cell) in key.0.iter().enumerate() {
                for (face, sign) in cell.faces() {
                    let mut factors = key.0.clone();
                    factors[idx] = face;
                    result.add_term(
                        Tensor(factors),
                        value * sign * minus_one_to_the(preceding),
                    );
                }
                preceding += cell.dimension();
            }
        }
        result
    }

    fn iterated_diagonal(&self, times: usize, coord: usize) -> Self {
        let mut result = self.zero();
        for (key, value) in self.iter() {
            assert!(
                (1..=key.arity()).contains(&coord),
                "coordinate {coord} out of range for {key}"
            );
            let (left, rest) = key.0.split_at(coord - 1);
            let (cell, right) = (&rest[0], &rest[1..]);
            for (pieces, sign) in cell.diagonal(times) {
                let factors = left.iter().cloned().chain(pieces).chain(right.iter().cloned());
                result.add_term(factors.collect(), value * sign);
            }
        }
        result
    }
}
