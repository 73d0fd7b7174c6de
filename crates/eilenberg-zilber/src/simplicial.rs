use std::fmt;

use formal_sum::FormalSum;
use itertools::Itertools;

use crate::{minus_one_to_the, Cell, Complex, Tensor};

/// A simplex of the standard simplex, given by its vertices.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Simplex(Vec<u32>);

pub type EilenbergZilberElement = FormalSum<Tensor<Simplex>>;

impl Simplex {
    pub fn new(vertices: Vec<u32>) -> Self {
        Self(vertices)
    }

    pub fn vertices(&self) -> &[u32] {
        &self.0
    }

    /// The face opposite to the `i`th vertex.
    pub fn face(&self, i: usize) -> Self {
        let mut vertices = self.0.clone();
        vertices.remove(i);
        Self(vertices)
    }

    /// The chain `Δ^n ⊗ ⋯ ⊗ Δ^n` with `times` factors.
    pub fn standard_element(n: u32, times: usize) -> EilenbergZilberElement {
        let top = Self((0..=n).collect());
        FormalSum::from_terms([(Tensor::new(vec![top; times]), 1)], None)
    }
}

impl Cell for Simplex {
    const COMPLEX: Complex = Complex::Simplicial;

    fn dimension(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    fn is_degenerate(&self) -> bool {
        self.0.is_empty() || self.0.iter().tuple_windows().any(|(a, b)| a == b)
    }

    /// Vertices have no faces in the normalized chains.
    fn faces(&self) -> Vec<(Self, i64)> {
        if self.0.len() <= 1 {
            return Vec::new();
        }
        (0..self.0.len())
            .map(|i| (self.face(i), minus_one_to_the(i)))
            .collect()
    }

    /// The Alexander–Whitney diagonal, iterated. Consecutive factors share their last and first
    /// vertices.
    fn diagonal(&self, times: usize) -> Vec<(Vec<Self>, i64)> {
        if times == 0 {
            return vec![(vec![self.clone()], 1)];
        }
        let dim = self.dimension();
        (0..=dim)
            .combinations_with_replacement(times)
            .map(|cuts| {
                let endpoints = std::iter::once(0).chain(cuts).chain(std::iter::once(dim));
                let pieces = endpoints
                    .tuple_windows()
                    .map(|(a, b)| Self(self.0[a..=b].to_vec()))
                    .collect();
                (pieces, 1)
            })
            .collect()
    }

    /// Concatenation of vertex lists.
    fn join(cells: &[&Self]) -> Vec<(Self, i64)> {
        let joined = Self(cells.iter().flat_map(|c| c.0.iter().copied()).collect());
        if joined.is_degenerate() {
            Vec::new()
        } else {
            vec![(joined, 1)]
        }
    }
}

impl fmt::Display for Simplex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(","))
    }
}
