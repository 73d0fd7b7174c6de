//! Elements of the surjection operad.
//!
//! A basis element of arity `r` and degree `d` is a sequence of length `r + d` taking every value
//! in `1..=r`, with no two consecutive entries equal. Sequences that fail either condition are
//! zero, and are dropped as soon as they appear in a [`SurjectionElement`].

mod action;
mod boundary;
mod chain_action;
mod composition;
mod json;
mod parser;
mod suspension;

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use formal_sum::{Basis, FormalSum};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{Convention, Result, SurjectionError};

pub use action::Representation;

/// `(-1)^exp`
pub(crate) fn minus_one_to_the(exp: usize) -> i64 {
    if exp % 2 == 0 {
        1
    } else {
        -1
    }
}

/// The exponent of the Koszul sign picked up when sorting entries of the given weights into the
/// order prescribed by `order`. Only the parity of the result is meaningful.
pub(crate) fn koszul_exponent(order: &[u32], weights: &[usize]) -> usize {
    debug_assert_eq!(order.len(), weights.len());
    (0..order.len())
        .tuple_combinations()
        .filter(|&(a, b)| order[a] > order[b])
        .map(|(a, b)| weights[a] * weights[b])
        .sum()
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisSurjection(Vec<u32>);

impl BasisSurjection {
    pub fn new(values: Vec<u32>) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The largest value attained.
    pub fn arity(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0) as usize
    }

    pub fn degree(&self) -> usize {
        self.len().saturating_sub(self.arity())
    }

    /// Whether every value in `1..=arity` is attained.
    pub fn is_surjective(&self) -> bool {
        let mut seen = vec![false; self.arity()];
        for &v in &self.0 {
            match v.checked_sub(1) {
                Some(idx) => seen[idx as usize] = true,
                None => return false,
            }
        }
        seen.into_iter().all(|x| x)
    }

    /// The largest number of alternations between two values, less one.
    pub fn complexity(&self) -> usize {
        (1..=self.arity() as u32)
            .tuple_combinations()
            .map(|(i, j)| {
                let transitions = self
                    .0
                    .iter()
                    .filter(|&&v| v == i || v == j)
                    .tuple_windows()
                    .filter(|(a, b)| a != b)
                    .count();
                transitions.saturating_sub(1)
            })
            .max()
            .unwrap_or(0)
    }

    /// The indices whose value occurs again further to the right.
    pub(crate) fn caesuras(&self) -> Vec<usize> {
        (0..self.len())
            .filter(|&idx| self.0[idx + 1..].contains(&self.0[idx]))
            .collect()
    }

    /// The sequence with the entry at `idx` removed.
    pub(crate) fn remove(&self, idx: usize) -> Self {
        let mut values = self.0.clone();
        values.remove(idx);
        Self(values)
    }
}

impl Basis for BasisSurjection {
    fn is_degenerate(&self) -> bool {
        self.is_empty()
            || !self.is_surjective()
            || self.0.iter().tuple_windows().any(|(a, b)| a == b)
    }
}

impl From<Vec<u32>> for BasisSurjection {
    fn from(values: Vec<u32>) -> Self {
        Self(values)
    }
}

impl fmt::Display for BasisSurjection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({})", self.0.iter().join(","))
    }
}

/// A linear combination of basis surjections, together with the sign convention used by its
/// structure maps. Equality ignores the convention.
#[derive(Clone, Debug)]
pub struct SurjectionElement {
    sum: FormalSum<BasisSurjection>,
    convention: Convention,
}

impl SurjectionElement {
    /// The zero element.
    ///
    /// # Panics
    ///
    /// If `torsion` is `Some(0)`.
    pub fn new(torsion: Option<u32>, convention: Convention) -> Self {
        Self {
            sum: FormalSum::new(torsion),
            convention,
        }
    }

    /// Builds an element from sequences and their coefficients. Degenerate and non-surjective
    /// sequences are zero, but empty sequences and sequences containing `0` are rejected.
    pub fn from_terms(
        terms: impl IntoIterator<Item = (Vec<u32>, i64)>,
        torsion: Option<u32>,
        convention: Convention,
    ) -> Result<Self> {
        if torsion == Some(0) {
            return Err(SurjectionError::MalformedInput(
                "torsion must be positive".to_string(),
            ));
        }
        let mut result = Self::new(torsion, convention);
        for (values, coeff) in terms {
            if values.is_empty() || values.contains(&0) {
                return Err(SurjectionError::MalformedInput(format!(
                    "{values:?} is not a sequence of positive integers"
                )));
            }
            result.sum.add_term(BasisSurjection(values), coeff);
        }
        Ok(result)
    }

    /// The element with a single term of coefficient `1`.
    pub fn basis_element(values: Vec<u32>, convention: Convention) -> Result<Self> {
        Self::from_terms([(values, 1)], None, convention)
    }

    pub(crate) fn from_sum(sum: FormalSum<BasisSurjection>, convention: Convention) -> Self {
        Self { sum, convention }
    }

    /// The zero element with the torsion and convention of `self`.
    pub fn zero(&self) -> Self {
        Self::from_sum(self.sum.zero(), self.convention)
    }

    /// An element with the torsion and convention of `self`.
    pub fn create(&self, terms: impl IntoIterator<Item = (BasisSurjection, i64)>) -> Self {
        Self::from_sum(self.sum.create(terms), self.convention)
    }

    fn common(&self, f: impl Fn(&BasisSurjection) -> usize) -> Option<usize> {
        let mut values = self.sum.keys().map(f);
        let first = values.next()?;
        values.all(|v| v == first).then_some(first)
    }

    /// The common arity of the terms. This is `None` for zero and for inhomogeneous elements.
    pub fn arity(&self) -> Option<usize> {
        self.common(BasisSurjection::arity)
    }

    /// The common degree of the terms. This is `None` for zero and for inhomogeneous elements.
    pub fn degree(&self) -> Option<usize> {
        self.common(BasisSurjection::degree)
    }

    /// The largest complexity of a term, or `0` for the zero element.
    pub fn complexity(&self) -> usize {
        self.sum
            .keys()
            .map(BasisSurjection::complexity)
            .max()
            .unwrap_or(0)
    }

    pub fn torsion(&self) -> Option<u32> {
        self.sum.torsion()
    }

    pub fn set_torsion(&mut self, torsion: Option<u32>) {
        self.sum.set_torsion(torsion);
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn with_convention(mut self, convention: Convention) -> Self {
        self.convention = convention;
        self
    }

    pub fn is_zero(&self) -> bool {
        self.sum.is_zero()
    }

    pub fn len(&self) -> usize {
        self.sum.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sum.is_zero()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BasisSurjection, i64)> + '_ {
        self.sum.iter()
    }

    pub fn coefficient(&self, values: &[u32]) -> i64 {
        self.sum.coefficient(&BasisSurjection(values.to_vec()))
    }

    pub fn as_sum(&self) -> &FormalSum<BasisSurjection> {
        &self.sum
    }

    pub(crate) fn check_homogeneous(&self, operation: &'static str) -> Result<(usize, usize)> {
        self.arity()
            .zip(self.degree())
            .ok_or(SurjectionError::Inhomogeneous(operation))
    }
}

impl PartialEq for SurjectionElement {
    fn eq(&self, other: &Self) -> bool {
        self.sum == other.sum
    }
}

impl Eq for SurjectionElement {}

impl AddAssign<&SurjectionElement> for SurjectionElement {
    fn add_assign(&mut self, other: &Self) {
        self.sum += &other.sum;
    }
}

impl AddAssign for SurjectionElement {
    fn add_assign(&mut self, other: Self) {
        self.sum += other.sum;
    }
}

impl SubAssign<&SurjectionElement> for SurjectionElement {
    fn sub_assign(&mut self, other: &Self) {
        self.sum -= &other.sum;
    }
}

impl Add for SurjectionElement {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl Add for &SurjectionElement {
    type Output = SurjectionElement;

    fn add(self, other: Self) -> SurjectionElement {
        SurjectionElement::from_sum(&self.sum + &other.sum, self.convention)
    }
}

impl Sub for SurjectionElement {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= &other;
        self
    }
}

impl Sub for &SurjectionElement {
    type Output = SurjectionElement;

    fn sub(self, other: Self) -> SurjectionElement {
        SurjectionElement::from_sum(&self.sum - &other.sum, self.convention)
    }
}

impl Neg for SurjectionElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self::from_sum(-self.sum, self.convention)
    }
}

impl Neg for &SurjectionElement {
    type Output = SurjectionElement;

    fn neg(self) -> SurjectionElement {
        -self.clone()
    }
}

impl Mul<i64> for SurjectionElement {
    type Output = Self;

    fn mul(self, c: i64) -> Self {
        Self::from_sum(self.sum * c, self.convention)
    }
}

impl Mul<i64> for &SurjectionElement {
    type Output = SurjectionElement;

    fn mul(self, c: i64) -> SurjectionElement {
        self.clone() * c
    }
}

impl Mul<&SurjectionElement> for i64 {
    type Output = SurjectionElement;

    fn mul(self, x: &SurjectionElement) -> SurjectionElement {
        x * self
    }
}

impl std::iter::Sum for SurjectionElement {
    /// The convention of the result is that of the first summand.
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        match iter.next() {
            Some(first) => iter.fold(first, |acc, x| acc + x),
            None => Self::new(None, Convention::default()),
        }
    }
}

impl fmt::Display for SurjectionElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.sum, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use rstest::rstest;

    fn bf(values: &[u32]) -> SurjectionElement {
        SurjectionElement::basis_element(values.to_vec(), Convention::BergerFresse).unwrap()
    }

    #[test]
    fn test_grading() {
        for values in [&[1, 2, 1, 3, 1], &[1, 3, 1, 2, 1]] {
            let x = bf(values);
            assert_eq!(x.arity(), Some(3));
            assert_eq!(x.degree(), Some(2));
            assert_eq!(x.complexity(), 1);
        }
        let x = bf(&[1, 3, 1, 2, 1]);

        let zero = x.zero();
        assert_eq!(zero.arity(), None);
        assert_eq!(zero.degree(), None);
        assert_eq!(zero.complexity(), 0);

        let mixed = bf(&[1, 2, 1]) + bf(&[1, 2, 3]);
        assert_eq!(mixed.arity(), None);
        assert_eq!(mixed.degree(), None);
        assert_eq!(mixed.complexity(), 1);
    }

    #[rstest]
    #[case(&[1, 2], 0)]
    #[case(&[1, 2, 1], 1)]
    #[case(&[1, 2, 1, 2, 1], 3)]
    #[case(&[1, 2, 3, 1, 2], 2)]
    #[case(&[1, 3, 2, 1, 3, 2], 2)]
    fn test_complexity(#[case] values: &[u32], #[case] complexity: usize) {
        assert_eq!(BasisSurjection::new(values.to_vec()).complexity(), complexity);
    }

    #[test]
    fn test_normalization() {
        let x = SurjectionElement::from_terms(
            [
                (vec![1, 2, 2, 1], 1),
                (vec![1, 3], 4),
                (vec![2, 1], 3),
                (vec![2, 1], -1),
            ],
            None,
            Convention::default(),
        )
        .unwrap();
        assert_eq!(x, bf(&[2, 1]) * 2);
        assert_eq!(3 * &bf(&[1, 3, 1, 2, 1]), bf(&[1, 3, 1, 2, 1]) * 3);
        assert_eq!(
            x.clone().with_convention(Convention::McClureSmith),
            x,
            "equality ignores the convention"
        );
    }

    #[test]
    fn test_malformed() {
        for values in [vec![], vec![1, 0, 1]] {
            assert!(matches!(
                SurjectionElement::basis_element(values, Convention::default()),
                Err(SurjectionError::MalformedInput(_))
            ));
        }
        assert!(matches!(
            SurjectionElement::from_terms([(vec![1], 1)], Some(0), Convention::default()),
            Err(SurjectionError::MalformedInput(_))
        ));
    }

    #[test]
    fn test_torsion() {
        let mut x = bf(&[1, 2, 1]) * 3 - bf(&[2, 1, 2]);
        x.set_torsion(Some(3));
        assert_eq!(x.coefficient(&[1, 2, 1]), 0);
        assert_eq!(x.coefficient(&[2, 1, 2]), 2);
        assert_eq!(x.torsion(), Some(3));
    }

    #[test]
    fn test_display() {
        let check = |x: SurjectionElement, output: expect_test::Expect| {
            output.assert_eq(&x.to_string());
        };

        check(bf(&[1, 2, 1]).zero(), expect![[r#"0"#]]);
        check(-bf(&[2, 1, 2]), expect![[r#"- (2,1,2)"#]]);
        check(
            bf(&[1, 3, 1, 2, 1, 4]) - bf(&[1, 2, 3, 2, 1, 4]) + bf(&[1, 2]) * 2,
            expect![[r#"2(1,2) - (1,2,3,2,1,4) + (1,3,1,2,1,4)"#]],
        );
    }

    #[test]
    fn test_koszul_exponent() {
        assert_eq!(koszul_exponent(&[1, 2, 3], &[1, 1, 1]), 0);
        assert_eq!(koszul_exponent(&[3, 2, 1], &[1, 1, 1]), 3);
        assert_eq!(koszul_exponent(&[2, 1], &[1, 0]), 0);
        assert_eq!(koszul_exponent(&[2, 1, 1], &[1, 1, 1]), 2);
    }
}
