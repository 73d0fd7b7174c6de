use std::fmt;

use formal_sum::FormalSum;
use itertools::Itertools;

use crate::{minus_one_to_the, Cell, Complex, Tensor};

/// A face of the unit interval: one of its endpoints or the whole interval.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Interval {
    Zero,
    One,
    Full,
}

impl Interval {
    /// Reads `0`, `1` and `2` as `[0]`, `[1]` and `I` respectively.
    pub fn from_digit(digit: u32) -> Option<Self> {
        match digit {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            2 => Some(Self::Full),
            _ => None,
        }
    }

    pub fn digit(self) -> u32 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Full => 2,
        }
    }
}

/// A face of the standard cube, one interval per coordinate.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cube(Vec<Interval>);

pub type CubicalEilenbergZilberElement = FormalSum<Tensor<Cube>>;

impl Cube {
    pub fn new(intervals: Vec<Interval>) -> Self {
        Self(intervals)
    }

    pub fn from_digits(digits: &[u32]) -> Option<Self> {
        digits
            .iter()
            .map(|&d| Interval::from_digit(d))
            .collect::<Option<_>>()
            .map(Self)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.0
    }

    /// The chain `I^n ⊗ ⋯ ⊗ I^n` with `times` factors.
    pub fn standard_element(n: usize, times: usize) -> CubicalEilenbergZilberElement {
        let top = Self(vec![Interval::Full; n]);
        FormalSum::from_terms([(Tensor::new(vec![top; times]), 1)], None)
    }

    fn full_coordinates(&self) -> Vec<usize> {
        self.0
            .iter()
            .positions(|&x| x == Interval::Full)
            .collect()
    }

    fn with(&self, i: usize, interval: Interval) -> Self {
        let mut intervals = self.0.clone();
        intervals[i] = interval;
        Self(intervals)
    }
}

/// The join of `cells` for a fixed choice of pivots. On the coordinates strictly between two
/// pivots the result copies the corresponding cell, and on the `b`th pivot it is `I` provided
/// the `b`th and `b + 1`st cells are `[0]` and `[1]` there. Every other cell has to be a vertex on
/// each of these coordinates.
fn join_at(cells: &[&Cube], pivots: &[usize]) -> Option<Cube> {
    let n = cells[0].0.len();
    let vertex_elsewhere = |i: usize, own: &[usize]| {
        cells
            .iter()
            .enumerate()
            .all(|(m, c)| own.contains(&m) || c.0[i] != Interval::Full)
    };

    let mut result = Vec::with_capacity(n);
    let mut start = 0;
    for (block, cell) in cells.iter().enumerate() {
        let end = pivots.get(block).copied().unwrap_or(n);
        for i in start..end {
            if !vertex_elsewhere(i, &[block]) {
                return None;
            }
            result.push(cell.0[i]);
        }
        if end < n {
            if !vertex_elsewhere(end, &[block, block + 1]) {
                return None;
            }
            if (cell.0[end], cells[block + 1].0[end]) != (Interval::Zero, Interval::One) {
                return None;
            }
            result.push(Interval::Full);
            start = end + 1;
        }
    }
    Some(Cube(result))
}

impl Cell for Cube {
    const COMPLEX: Complex = Complex::Cubical;

    fn dimension(&self) -> usize {
        self.0.iter().filter(|&&x| x == Interval::Full).count()
    }

    /// `∂I = [1] - [0]`, with the Koszul sign of the preceding full coordinates.
    fn faces(&self) -> Vec<(Self, i64)> {
        self.full_coordinates()
            .into_iter()
            .enumerate()
            .flat_map(|(j, i)| {
                let sign = minus_one_to_the(j);
                [
                    (self.with(i, Interval::One), sign),
                    (self.with(i, Interval::Zero), -sign),
                ]
            })
            .collect()
    }

    /// The Serre diagonal, iterated. Each full coordinate stays full in exactly one factor, is
    /// `[0]` in the factors before it and `[1]` in the factors after it. The sign is that of the
    /// shuffle bringing the full coordinates into their factors.
    fn diagonal(&self, times: usize) -> Vec<(Vec<Self>, i64)> {
        let full = self.full_coordinates();
        if times == 0 || full.is_empty() {
            return vec![(vec![self.clone(); times + 1], 1)];
        }
        full.iter()
            .map(|_| 0..=times)
            .multi_cartesian_product()
            .map(|choice| {
                let factors = (0..=times)
                    .map(|f| {
                        let mut intervals = self.0.clone();
                        for (&i, &c) in full.iter().zip(&choice) {
                            intervals[i] = match f.cmp(&c) {
                                std::cmp::Ordering::Less => Interval::Zero,
                                std::cmp::Ordering::Equal => Interval::Full,
                                std::cmp::Ordering::Greater => Interval::One,
                            };
                        }
                        Self(intervals)
                    })
                    .collect();
                let inversions = choice
                    .iter()
                    .tuple_combinations()
                    .filter(|(a, b)| a > b)
                    .count();
                (factors, minus_one_to_the(inversions))
            })
            .collect()
    }

    fn join(cells: &[&Self]) -> Vec<(Self, i64)> {
        match cells {
            [] => Vec::new(),
            [cell] => vec![((*cell).clone(), 1)],
            _ => {
                let n = cells[0].0.len();
                assert!(cells.iter().all(|c| c.0.len() == n));
                (0..n)
                    .combinations(cells.len() - 1)
                    .filter_map(|pivots| join_at(cells, &pivots))
                    .map(|cube| (cube, 1))
                    .collect()
            }
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.digit())
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(","))
    }
}
