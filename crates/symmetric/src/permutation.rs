use std::fmt;
use std::ops::{Index, Mul};

use formal_sum::Basis;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PermutationError {
    /// The images are not `1..=n` in some order.
    #[error("{0:?} is not a permutation")]
    NotAPermutation(Vec<u32>),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Permutation(Vec<u32>);

impl Basis for Permutation {}

impl Permutation {
    pub fn new(images: Vec<u32>) -> Result<Self, PermutationError> {
        let mut sorted = images.clone();
        sorted.sort_unstable();
        if sorted.iter().copied().eq(1..=images.len() as u32) {
            Ok(Self(images))
        } else {
            Err(PermutationError::NotAPermutation(images))
        }
    }

    pub fn identity(arity: usize) -> Self {
        Self((1..=arity as u32).collect())
    }

    /// The cyclic permutation `(2, 3, …, n, 1)`.
    pub fn rotation(arity: usize) -> Self {
        Self((1..=arity as u32).map(|i| i % arity as u32 + 1).collect())
    }

    pub fn arity(&self) -> usize {
        self.0.len()
    }

    pub fn images(&self) -> &[u32] {
        &self.0
    }

    /// The image of `i`, where `1 <= i <= arity`.
    pub fn apply(&self, i: u32) -> u32 {
        self.0[i as usize - 1]
    }

    /// `(-1)` raised to the number of inversions.
    pub fn sign(&self) -> i64 {
        let inversions = self
            .0
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count();
        if inversions % 2 == 0 {
            1
        } else {
            -1
        }
    }

    pub fn inverse(&self) -> Self {
        let mut images = vec![0; self.arity()];
        for (idx, &v) in self.0.iter().enumerate() {
            images[v as usize - 1] = idx as u32 + 1;
        }
        Self(images)
    }
}

impl Index<usize> for Permutation {
    type Output = u32;

    fn index(&self, idx: usize) -> &u32 {
        &self.0[idx]
    }
}

impl Mul for &Permutation {
    type Output = Permutation;

    fn mul(self, other: &Permutation) -> Permutation {
        assert_eq!(self.arity(), other.arity());
        Permutation(other.0.iter().map(|&i| self.apply(i)).collect())
    }
}

impl TryFrom<Vec<u32>> for Permutation {
    type Error = PermutationError;

    fn try_from(images: Vec<u32>) -> Result<Self, PermutationError> {
        Self::new(images)
    }
}

impl fmt::Display for Permutation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(","))
    }
}
