use std::cmp::Ordering;
use std::iter::once;

use formal_sum::FormalSum;
use itertools::Itertools;
use maybe_rayon::prelude::*;

use super::{minus_one_to_the, BasisSurjection, SurjectionElement};
use crate::{error::check_torsion, Convention, Result, SurjectionError};

/// All non-decreasing sequences of `count` cut points in `0..len`.
pub(crate) fn cut_points(len: usize, count: usize) -> Vec<Vec<usize>> {
    if count == 0 {
        return vec![Vec::new()];
    }
    (0..len).combinations_with_replacement(count).collect()
}

/// For each interval `[a, b)` between consecutive endpoints, the parity of the number of
/// caesuras it contains.
fn caesura_parities(caesuras: &[usize], endpoints: &[usize]) -> Vec<usize> {
    endpoints
        .iter()
        .tuple_windows()
        .map(|(&a, &b)| caesuras.iter().filter(|&&e| a <= e && e < b).count() % 2)
        .collect()
}

struct Composition<'a> {
    outer: &'a BasisSurjection,
    inner: &'a BasisSurjection,
    position: u32,
    inner_arity: u32,
    /// The occurrences of `position` in `outer`.
    slots: Vec<usize>,
    outer_parities: Vec<usize>,
    inner_caesuras: Vec<usize>,
}

impl<'a> Composition<'a> {
    fn new(
        outer: &'a BasisSurjection,
        inner: &'a BasisSurjection,
        position: u32,
        inner_arity: u32,
    ) -> Self {
        let slots: Vec<usize> = outer.values().iter().positions(|&v| v == position).collect();
        let endpoints: Vec<usize> = once(0)
            .chain(slots.iter().copied())
            .chain(once(outer.len() - 1))
            .collect();
        Self {
            outer,
            inner,
            position,
            inner_arity,
            outer_parities: caesura_parities(&outer.caesuras(), &endpoints),
            inner_caesuras: inner.caesuras(),
            slots,
        }
    }

    /// The Berger–Fresse sign of the splitting of `inner` at `endpoints`. A piece containing an
    /// odd number of caesuras of `inner` is moved past the caesuras of `outer` lying to the right
    /// of the slot it is inserted in.
    fn sign(&self, endpoints: &[usize]) -> i64 {
        let inner_parities = caesura_parities(&self.inner_caesuras, endpoints);
        let exp: usize = inner_parities
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == 1)
            .map(|(idx, _)| self.outer_parities[idx + 1..].iter().sum::<usize>())
            .sum();
        minus_one_to_the(exp)
    }

    /// The terms of `outer ∘_position inner`, with signs if `signed` holds.
    fn terms(&self, signed: bool) -> Vec<(BasisSurjection, i64)> {
        let last = self.inner.len() - 1;
        cut_points(self.inner.len(), self.slots.len() - 1)
            .into_iter()
            .map(|cuts| {
                let endpoints: Vec<usize> = once(0).chain(cuts).chain(once(last)).collect();
                let mut pieces = endpoints
                    .iter()
                    .tuple_windows()
                    .map(|(&a, &b)| &self.inner.values()[a..=b]);

                let mut values = Vec::with_capacity(self.outer.len() + self.inner.len());
                for &v in self.outer.values() {
                    match v.cmp(&self.position) {
                        Ordering::Less => values.push(v),
                        Ordering::Equal => values.extend(
                            pieces
                                .next()
                                .into_iter()
                                .flatten()
                                .map(|&u| u + self.position - 1),
                        ),
                        Ordering::Greater => values.push(v + self.inner_arity - 1),
                    }
                }
                let sign = if signed { self.sign(&endpoints) } else { 1 };
                (BasisSurjection(values), sign)
            })
            .collect()
    }
}

impl SurjectionElement {
    /// The operadic composition `self ∘_position other`, inserting `other` into the input
    /// `position` of `self`.
    #[tracing::instrument(skip(self, other), fields(left = self.len(), right = other.len()))]
    pub fn compose(&self, other: &Self, position: usize) -> Result<Self> {
        if self.is_zero() || other.is_zero() {
            return Ok(self.zero());
        }
        check_torsion(self.torsion(), other.torsion())?;
        let arity = self
            .arity()
            .ok_or(SurjectionError::Inhomogeneous("composition"))?;
        let inner_arity = other
            .arity()
            .ok_or(SurjectionError::Inhomogeneous("composition"))?;
        if !(1..=arity).contains(&position) {
            return Err(SurjectionError::CoordinateOutOfRange {
                coord: position,
                arity,
            });
        }
        let signed = self.torsion() != Some(2);
        if signed && self.convention == Convention::McClureSmith {
            return Err(SurjectionError::NotImplemented {
                operation: "composition",
                convention: self.convention,
            });
        }

        let outer: Vec<_> = self.iter().collect();
        let inner: Vec<_> = other.iter().collect();
        let pairs: Vec<_> = outer.iter().cartesian_product(inner.iter()).collect();
        let partial_sums: Vec<FormalSum<BasisSurjection>> = pairs
            .into_maybe_par_iter()
            .map(|(&(k1, v1), &(k2, v2))| {
                let composition = Composition::new(k1, k2, position as u32, inner_arity as u32);
                self.sum.create(
                    composition
                        .terms(signed)
                        .into_iter()
                        .map(|(key, sign)| (key, sign * v1 * v2)),
                )
            })
            .collect();

        let mut result = self.zero();
        for sum in partial_sums {
            result.sum += sum;
        }
        tracing::debug!(terms = result.len(), "composition done");
        Ok(result)
    }
}
