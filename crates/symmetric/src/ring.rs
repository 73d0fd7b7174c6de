use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use formal_sum::FormalSum;

use crate::Permutation;

/// An element of the group ring `Z[Σ_n]`, or `Z/t[Σ_n]` when a torsion is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SymmetricRingElement {
    sum: FormalSum<Permutation>,
}

impl SymmetricRingElement {
    pub fn new(torsion: Option<u32>) -> Self {
        Self {
            sum: FormalSum::new(torsion),
        }
    }

    pub fn from_terms(
        terms: impl IntoIterator<Item = (Permutation, i64)>,
        torsion: Option<u32>,
    ) -> Self {
        Self {
            sum: FormalSum::from_terms(terms, torsion),
        }
    }

    pub fn from_permutation(permutation: Permutation, torsion: Option<u32>) -> Self {
        Self::from_terms([(permutation, 1)], torsion)
    }

    pub fn identity(arity: usize, torsion: Option<u32>) -> Self {
        Self::from_permutation(Permutation::identity(arity), torsion)
    }

    pub fn rotation(arity: usize, torsion: Option<u32>) -> Self {
        Self::from_permutation(Permutation::rotation(arity), torsion)
    }

    /// `rotation - identity`.
    pub fn transposition(arity: usize, torsion: Option<u32>) -> Self {
        Self::rotation(arity, torsion) - Self::identity(arity, torsion)
    }

    /// The sum of all powers of the rotation.
    pub fn norm(arity: usize, torsion: Option<u32>) -> Self {
        let rho = Permutation::rotation(arity);
        let powers = std::iter::successors(Some(Permutation::identity(arity)), |p| Some(&rho * p));
        Self::from_terms(powers.take(arity).map(|p| (p, 1)), torsion)
    }

    /// The common arity of the permutations involved. This is `None` for the zero element and
    /// for elements mixing several arities.
    pub fn arity(&self) -> Option<usize> {
        let mut arities = self.sum.keys().map(Permutation::arity);
        let first = arities.next()?;
        arities.all(|a| a == first).then_some(first)
    }

    pub fn torsion(&self) -> Option<u32> {
        self.sum.torsion()
    }

    pub fn is_zero(&self) -> bool {
        self.sum.is_zero()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Permutation, i64)> + '_ {
        self.sum.iter()
    }

    pub fn as_sum(&self) -> &FormalSum<Permutation> {
        &self.sum
    }

    /// `self` raised to the power `exp`. The zeroth power of a non-zero element is the identity
    /// of its arity, and every power of zero is zero.
    pub fn pow(&self, exp: u32) -> Self {
        let Some(arity) = self.arity() else {
            return self.clone();
        };
        (0..exp).fold(Self::identity(arity, self.torsion()), |acc, _| &acc * self)
    }
}

impl Mul for &SymmetricRingElement {
    type Output = SymmetricRingElement;

    fn mul(self, other: &SymmetricRingElement) -> SymmetricRingElement {
        assert_eq!(self.torsion(), other.torsion());
        let terms = self
            .iter()
            .flat_map(|(p, a)| other.iter().map(move |(q, b)| (p * q, a * b)));
        SymmetricRingElement::from_terms(terms, self.torsion())
    }
}

impl Mul<i64> for SymmetricRingElement {
    type Output = Self;

    fn mul(self, c: i64) -> Self {
        Self { sum: self.sum * c }
    }
}

impl Add for SymmetricRingElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            sum: self.sum + other.sum,
        }
    }
}

impl Sub for SymmetricRingElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            sum: self.sum - other.sum,
        }
    }
}

impl Neg for SymmetricRingElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self { sum: -self.sum }
    }
}

impl fmt::Display for SymmetricRingElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.sum, f)
    }
}
