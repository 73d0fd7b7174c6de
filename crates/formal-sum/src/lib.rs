//! Formal linear combinations of basis keys with integer coefficients.
//!
//! A [`FormalSum`] is a finitely supported map from basis keys to `i64`, optionally reduced
//! modulo a torsion `t`. The map is kept normalized at all times: coefficients are reduced into
//! `0..t` when a torsion is set, zero coefficients are dropped and keys that the [`Basis`]
//! declares degenerate are never stored. Two sums are equal exactly when their normalized maps
//! and their torsions agree.

use rustc_hash::FxHashMap as HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

/// A basis key of a free module.
///
/// Degenerate keys represent zero in the quotient we work in, and are silently discarded
/// whenever they would be inserted into a [`FormalSum`].
pub trait Basis: Clone + Eq + Hash + Ord {
    fn is_degenerate(&self) -> bool {
        false
    }
}

fn reduce(coeff: i64, torsion: Option<u32>) -> i64 {
    match torsion {
        Some(t) => coeff.rem_euclid(t as i64),
        None => coeff,
    }
}

#[derive(Clone, Debug)]
pub struct FormalSum<K> {
    terms: HashMap<K, i64>,
    torsion: Option<u32>,
}

impl<K: Basis> Default for FormalSum<K> {
    fn default() -> Self {
        Self::new(None)
    }
}

impl<K: Basis> FormalSum<K> {
    /// The zero element with the given torsion.
    pub fn new(torsion: Option<u32>) -> Self {
        assert_ne!(torsion, Some(0), "torsion must be positive");
        Self {
            terms: HashMap::default(),
            torsion,
        }
    }

    /// Builds a sum from `(key, coefficient)` pairs. Repeated keys are added together.
    pub fn from_terms(terms: impl IntoIterator<Item = (K, i64)>, torsion: Option<u32>) -> Self {
        let mut result = Self::new(torsion);
        for (key, coeff) in terms {
            result.add_term(key, coeff);
        }
        result
    }

    /// The zero element with the same torsion as `self`.
    pub fn zero(&self) -> Self {
        Self::new(self.torsion)
    }

    /// Builds a sum with the same torsion as `self`.
    pub fn create(&self, terms: impl IntoIterator<Item = (K, i64)>) -> Self {
        Self::from_terms(terms, self.torsion)
    }

    pub fn torsion(&self) -> Option<u32> {
        self.torsion
    }

    /// Changes the torsion and reduces all coefficients accordingly.
    pub fn set_torsion(&mut self, torsion: Option<u32>) {
        assert_ne!(torsion, Some(0), "torsion must be positive");
        self.torsion = torsion;
        self.terms = std::mem::take(&mut self.terms)
            .into_iter()
            .map(|(k, v)| (k, reduce(v, torsion)))
            .filter(|&(_, v)| v != 0)
            .collect();
    }

    /// Adds `coeff * key` to `self`.
    pub fn add_term(&mut self, key: K, coeff: i64) {
        let torsion = self.torsion;
        let coeff = reduce(coeff, torsion);
        if coeff == 0 || key.is_degenerate() {
            return;
        }
        match self.terms.entry(key) {
            Entry::Occupied(mut entry) => {
                let value = reduce(*entry.get() + coeff, torsion);
                if value == 0 {
                    entry.remove();
                } else {
                    *entry.get_mut() = value;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(coeff);
            }
        }
    }

    /// Adds `c * other` to `self`.
    pub fn add(&mut self, other: &Self, c: i64) {
        assert_eq!(self.torsion, other.torsion);
        for (key, value) in other.iter() {
            self.add_term(key.clone(), value * c);
        }
    }

    pub fn coefficient(&self, key: &K) -> i64 {
        self.terms.get(key).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, i64)> + '_ {
        self.terms.iter().map(|(k, &v)| (k, v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.terms.keys()
    }

    /// The terms of `self`, ordered by key.
    pub fn sorted_terms(&self) -> Vec<(&K, i64)> {
        let mut terms: Vec<_> = self.iter().collect();
        terms.sort_unstable_by(|a, b| a.0.cmp(b.0));
        terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    /// Multiplies every coefficient by `c`.
    pub fn scale(&mut self, c: i64) {
        let torsion = self.torsion;
        self.terms = std::mem::take(&mut self.terms)
            .into_iter()
            .map(|(k, v)| (k, reduce(v * c, torsion)))
            .filter(|&(_, v)| v != 0)
            .collect();
    }

    /// Replaces the coefficient of every key `k` with `f(k, coefficient)`.
    pub fn map_coefficients(&self, mut f: impl FnMut(&K, i64) -> i64) -> Self {
        self.create(self.iter().map(|(k, v)| (k.clone(), f(k, v))))
    }
}

impl<K: Basis> PartialEq for FormalSum<K> {
    fn eq(&self, other: &Self) -> bool {
        self.torsion == other.torsion && self.terms == other.terms
    }
}

impl<K: Basis> Eq for FormalSum<K> {}

impl<K: Basis> AddAssign<&FormalSum<K>> for FormalSum<K> {
    fn add_assign(&mut self, other: &Self) {
        self.add(other, 1);
    }
}

impl<K: Basis> AddAssign for FormalSum<K> {
    fn add_assign(&mut self, other: Self) {
        assert_eq!(self.torsion, other.torsion);
        for (key, value) in other.terms {
            self.add_term(key, value);
        }
    }
}

impl<K: Basis> SubAssign<&FormalSum<K>> for FormalSum<K> {
    fn sub_assign(&mut self, other: &Self) {
        self.add(other, -1);
    }
}

impl<K: Basis> SubAssign for FormalSum<K> {
    fn sub_assign(&mut self, other: Self) {
        *self -= &other;
    }
}

impl<K: Basis> Add for FormalSum<K> {
    type Output = Self;

    fn add(mut self, other: Self) -> Self {
        self += other;
        self
    }
}

impl<K: Basis> Add for &FormalSum<K> {
    type Output = FormalSum<K>;

    fn add(self, other: Self) -> FormalSum<K> {
        let mut result = self.clone();
        result += other;
        result
    }
}

impl<K: Basis> Sub for FormalSum<K> {
    type Output = Self;

    fn sub(mut self, other: Self) -> Self {
        self -= &other;
        self
    }
}

impl<K: Basis> Sub for &FormalSum<K> {
    type Output = FormalSum<K>;

    fn sub(self, other: Self) -> FormalSum<K> {
        let mut result = self.clone();
        result -= other;
        result
    }
}

impl<K: Basis> Neg for FormalSum<K> {
    type Output = Self;

    fn neg(mut self) -> Self {
        self.scale(-1);
        self
    }
}

impl<K: Basis> Neg for &FormalSum<K> {
    type Output = FormalSum<K>;

    fn neg(self) -> FormalSum<K> {
        -self.clone()
    }
}

impl<K: Basis> Mul<i64> for FormalSum<K> {
    type Output = Self;

    fn mul(mut self, c: i64) -> Self {
        self.scale(c);
        self
    }
}

impl<K: Basis> Mul<i64> for &FormalSum<K> {
    type Output = FormalSum<K>;

    fn mul(self, c: i64) -> FormalSum<K> {
        self.clone() * c
    }
}

impl<K: Basis> Mul<&FormalSum<K>> for i64 {
    type Output = FormalSum<K>;

    fn mul(self, sum: &FormalSum<K>) -> FormalSum<K> {
        sum * self
    }
}

impl<K: Basis> std::iter::Sum for FormalSum<K> {
    /// The torsion of the result is that of the first summand. An empty sum is the integral zero.
    fn sum<I: Iterator<Item = Self>>(mut iter: I) -> Self {
        match iter.next() {
            Some(first) => iter.fold(first, |acc, x| acc + x),
            None => Self::default(),
        }
    }
}

impl<'a, K: Basis> IntoIterator for &'a FormalSum<K> {
    type Item = (&'a K, &'a i64);
    type IntoIter = std::collections::hash_map::Iter<'a, K, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

impl<K: Basis + fmt::Display> fmt::Display for FormalSum<K> {
    /// Terms are printed in key order, e.g. `(1,2) - 2(2,1)`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_zero() {
            return write!(f, "0");
        }
        for (i, (key, value)) in self.sorted_terms().into_iter().enumerate() {
            match (i, value < 0) {
                (0, false) => {}
                (0, true) => write!(f, "- ")?,
                (_, false) => write!(f, " + ")?,
                (_, true) => write!(f, " - ")?,
            }
            if value.abs() != 1 {
                write!(f, "{}", value.abs())?;
            }
            write!(f, "{key}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use itertools::Itertools;
    use rstest::rstest;

    /// Words in which equal adjacent letters vanish.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    struct Word(Vec<u32>);

    impl Basis for Word {
        fn is_degenerate(&self) -> bool {
            self.0.iter().tuple_windows().any(|(a, b)| a == b)
        }
    }

    impl fmt::Display for Word {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "({})", self.0.iter().join(","))
        }
    }

    fn word(w: &[u32]) -> Word {
        Word(w.to_vec())
    }

    #[test]
    fn test_normalization() {
        let x = FormalSum::from_terms(
            [
                (word(&[1, 2]), 1),
                (word(&[1, 1]), 5),
                (word(&[2, 1]), 3),
                (word(&[1, 2]), -1),
            ],
            None,
        );
        assert_eq!(x.len(), 1);
        assert_eq!(x.coefficient(&word(&[2, 1])), 3);
        assert_eq!(x.coefficient(&word(&[1, 1])), 0);
        assert_eq!(x.coefficient(&word(&[1, 2])), 0);
    }

    #[rstest]
    #[case(2, 1)]
    #[case(3, 0)]
    #[case(5, 3)]
    fn test_torsion(#[case] t: u32, #[case] expected: i64) {
        let mut x = FormalSum::from_terms([(word(&[1, 2]), 3), (word(&[2, 1]), -3)], None);
        x.set_torsion(Some(t));
        assert_eq!(x.coefficient(&word(&[1, 2])), expected);
        assert_eq!(x.coefficient(&word(&[2, 1])), reduce(-3, Some(t)));
        assert_eq!(x, x.create([(word(&[1, 2]), 3 + t as i64), (word(&[2, 1]), -3)]));
    }

    #[test]
    fn test_equality_depends_on_torsion() {
        let x = FormalSum::from_terms([(word(&[1, 2]), 1)], None);
        let mut y = x.clone();
        y.set_torsion(Some(3));
        assert_ne!(x, y);
        y.set_torsion(None);
        assert_eq!(x, y);
    }

    #[test]
    fn test_arithmetic() {
        let x = FormalSum::from_terms([(word(&[1, 2]), 1), (word(&[2, 1]), 2)], None);
        let y = FormalSum::from_terms([(word(&[1, 2]), 1), (word(&[1, 2, 1]), -1)], None);

        assert_eq!(&x - &x, x.zero());
        assert_eq!(&x + &y - y.clone(), x);
        assert_eq!(-&x + x.clone() * 2, x);
        assert_eq!(3 * &x, x.create([(word(&[1, 2]), 3), (word(&[2, 1]), 6)]));

        let mut z = x.clone();
        FormalSum::add(&mut z, &y, -2);
        assert_eq!(
            z,
            x.create([(word(&[1, 2]), -1), (word(&[2, 1]), 2), (word(&[1, 2, 1]), 2)])
        );

        let total: FormalSum<Word> = [x.clone(), y.clone(), -x.clone()].into_iter().sum();
        assert_eq!(total, y);
        assert_eq!(x.map_coefficients(|k, v| v * k.0.len() as i64), x * 2);
    }

    #[test]
    fn test_display() {
        let check = |x: FormalSum<Word>, output: expect_test::Expect| {
            output.assert_eq(&x.to_string());
        };

        check(FormalSum::new(None), expect![[r#"0"#]]);
        check(
            FormalSum::from_terms([(word(&[2, 1]), -1), (word(&[1, 2]), 2)], None),
            expect![[r#"2(1,2) - (2,1)"#]],
        );
        check(
            FormalSum::from_terms([(word(&[2, 1]), 1), (word(&[1, 2]), -1)], None),
            expect![[r#"- (1,2) + (2,1)"#]],
        );
    }
}
