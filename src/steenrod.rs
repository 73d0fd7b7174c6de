//! Representatives of Steenrod products and Steenrod operations in the surjection operad.
//!
//! The products `ψ(r, d)` come from a map of the minimal resolution of `Z[S_r]` into the
//! surjection operad in arity `r`. Such a map is built one degree at a time by applying a
//! contracting homotopy `h` of the surjection complex to the image of the previous degree under
//! the differential of the resolution, which alternates between `ρ - 1` and the norm element.

use itertools::Itertools;
use symmetric::SymmetricRingElement;

use crate::surjection::{minus_one_to_the, BasisSurjection, SurjectionElement};
use crate::{Convention, Result, SurjectionError};

/// Prepends `1, …, iterate` and raises the remaining values by `iterate`.
fn include(x: &SurjectionElement, iterate: u32) -> SurjectionElement {
    x.create(x.iter().map(|(key, value)| {
        let values = (1..=iterate)
            .chain(key.values().iter().map(|v| v + iterate))
            .collect();
        (BasisSurjection::new(values), value)
    }))
}

/// Removes the unique occurrence of `1` and lowers the remaining values, `iterate` times. Terms
/// in which `1` does not occur exactly once are sent to zero.
fn project(x: &SurjectionElement, iterate: u32) -> SurjectionElement {
    x.create(x.iter().filter_map(|(key, value)| {
        let mut values = key.values().to_vec();
        for _ in 0..iterate {
            let idx = values.iter().positions(|&v| v == 1).exactly_one().ok()?;
            values.remove(idx);
            for v in &mut values {
                *v -= 1;
            }
        }
        Some((BasisSurjection::new(values), value))
    }))
}

/// Prepends `1`, a homotopy between the identity and `include ∘ project`.
fn prepend_one(x: &SurjectionElement) -> SurjectionElement {
    x.create(x.iter().map(|(key, value)| {
        let values = std::iter::once(1).chain(key.values().iter().copied()).collect();
        (BasisSurjection::new(values), value)
    }))
}

/// The integral Steenrod products of a fixed arity and convention, in degrees `0..=max_degree`.
#[derive(Clone, Debug)]
pub struct SteenrodProducts {
    arity: usize,
    convention: Convention,
    products: Vec<SurjectionElement>,
}

impl SteenrodProducts {
    /// # Panics
    ///
    /// If `arity` is zero.
    pub fn new(arity: usize, convention: Convention) -> Self {
        assert!(arity > 0, "Steenrod products have positive arity");
        let unit = SurjectionElement::new(None, convention)
            .create([(BasisSurjection::new((1..=arity as u32).collect()), 1)]);
        Self {
            arity,
            convention,
            products: vec![unit],
        }
    }

    pub fn arity(&self) -> usize {
        self.arity
    }

    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn max_degree(&self) -> usize {
        self.products.len() - 1
    }

    /// The contracting homotopy of the surjection complex in arity `self.arity`, onto arity one.
    fn homotopy(&self, x: &SurjectionElement) -> SurjectionElement {
        let (mut result, corrections) = maybe_rayon::join(
            || prepend_one(x),
            || {
                (1..self.arity.saturating_sub(1) as u32)
                    .map(|r| include(&prepend_one(&project(x, r)), r))
                    .fold(x.zero(), |acc, y| acc + y)
            },
        );
        result += corrections;
        result
    }

    #[tracing::instrument(skip(self), fields(arity = self.arity, convention = %self.convention))]
    pub fn compute_through_degree(&mut self, degree: usize) {
        if degree <= self.max_degree() {
            return;
        }
        let norm = SymmetricRingElement::norm(self.arity, None);
        let transposition = SymmetricRingElement::transposition(self.arity, None);

        for d in self.products.len()..=degree {
            let operator = if d % 2 == 0 { &norm } else { &transposition };
            let next = self.homotopy(&self.products[d - 1].act(operator));
            tracing::debug!(degree = d, terms = next.len(), "Steenrod product computed");
            self.products.push(next);
        }
    }

    /// The product `ψ(arity, degree)`, reduced modulo `torsion`.
    pub fn product(&mut self, degree: usize, torsion: Option<u32>) -> SurjectionElement {
        self.compute_through_degree(degree);
        let mut result = self.products[degree].clone();
        result.set_torsion(torsion);
        result
    }
}

/// A representative of the Steenrod product of the given arity and degree.
///
/// # Panics
///
/// If `arity` is zero or `torsion` is `Some(0)`.
pub fn steenrod_product(
    arity: usize,
    degree: usize,
    torsion: Option<u32>,
    convention: Convention,
) -> SurjectionElement {
    SteenrodProducts::new(arity, convention).product(degree, torsion)
}

fn is_prime(p: u32) -> bool {
    p >= 2 && (2..p).take_while(|d| d * d <= p).all(|d| p % d != 0)
}

/// `n!` modulo `p`.
fn factorial_mod(n: u32, p: u32) -> i64 {
    (1..=n as i64).fold(1, |acc, k| acc * k % p as i64)
}

/// A representative of the Steenrod operation `P_s`, or `βP_s` if `bockstein` holds, acting on
/// cochains of degree `q` over the prime `p`. At `p = 2` this is `Sq^s`.
///
/// Coefficients follow Serre's convention, in which the normalization of the degree `2j` and
/// `2j + 1` classes differ by `(-1)^j` and `((p - 1) / 2)!`. The result lives in the
/// McClure–Smith convention with torsion `p`, and is zero when the operation vanishes for degree
/// reasons. A non-prime `p` is rejected.
pub fn steenrod_operation(p: u32, s: i64, q: i64, bockstein: bool) -> Result<SurjectionElement> {
    if !is_prime(p) {
        return Err(SurjectionError::InvalidSteenrodOperation(format!(
            "{p} is not a prime"
        )));
    }
    if p == 2 && bockstein {
        return Err(SurjectionError::InvalidSteenrodOperation(
            "bP_s is only defined for odd primes".to_string(),
        ));
    }

    let (coeff, degree) = if p == 2 {
        (1, s - q)
    } else {
        let mut coeff = minus_one_to_the((q.div_euclid(2) + s).rem_euclid(2) as usize);
        if q.rem_euclid(2) == 1 {
            coeff *= factorial_mod((p - 1) / 2, p);
        }
        (coeff, (2 * s - q) * (p as i64 - 1) - bockstein as i64)
    };

    let torsion = Some(p);
    if degree < 0 {
        return Ok(SurjectionElement::new(torsion, Convention::McClureSmith));
    }
    let product = steenrod_product(p as usize, degree as usize, torsion, Convention::McClureSmith);
    Ok(product * coeff)
}

/// The basis of the surjection complex in the given arity and degree, restricted to complexity at
/// most `complexity` (by default `degree`), in lexicographic order.
pub fn basis(arity: usize, degree: usize, complexity: Option<usize>) -> Vec<BasisSurjection> {
    if arity == 0 {
        return Vec::new();
    }
    let complexity = complexity.unwrap_or(degree);
    (0..arity + degree)
        .map(|_| 1..=arity as u32)
        .multi_cartesian_product()
        .map(BasisSurjection::new)
        .filter(|key| {
            !formal_sum::Basis::is_degenerate(key)
                && key.arity() == arity
                && key.complexity() <= complexity
        })
        .collect()
}
