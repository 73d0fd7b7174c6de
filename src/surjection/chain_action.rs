use eilenberg_zilber::{Cell, ChainElement, Complex, Tensor};
use formal_sum::FormalSum;
use itertools::Itertools;
use maybe_rayon::prelude::*;

use super::{koszul_exponent, minus_one_to_the, BasisSurjection, SurjectionElement};
use crate::{error::check_torsion, Convention, Result, SurjectionError};

/// The sign of applying the basis surjection `key` to the tensor `cells`, which has one factor
/// per entry of `key`. It is the Koszul sign of grouping the factors by value, together with the
/// sign of inserting a degree one operator between consecutive factors of the same group.
fn action_sign<C: Cell>(key: &BasisSurjection, cells: &[C]) -> i64 {
    let weights: Vec<usize> = cells.iter().map(|c| c.dimension() % 2).collect();
    let mut exp = koszul_exponent(key.values(), &weights);

    let order: Vec<usize> = (0..key.len())
        .sorted_by_key(|&idx| key.values()[idx])
        .collect();
    let mut preceding = 0;
    for (&a, &b) in order.iter().tuple_windows() {
        preceding += weights[a];
        if key.values()[a] == key.values()[b] {
            exp += preceding;
        }
    }
    minus_one_to_the(exp)
}

impl SurjectionElement {
    /// Applies `self` to the factor at `coord` of a simplicial or cubical chain.
    ///
    /// The factor is replaced by its `(arity + degree - 1)`-fold diagonal, after which the
    /// pieces labelled by each value of a basis surjection are joined.
    ///
    /// The result is a chain map, up to the usual sign `(-1)^degree`, only in the McClure–Smith
    /// convention. Cubical chains also accept Berger–Fresse elements, with the same signs, but the
    /// Leibniz rule fails for some of them.
    #[tracing::instrument(skip_all, fields(complex = ?C::COMPLEX, coord = coord))]
    pub fn act_on<C: Cell>(
        &self,
        chain: &FormalSum<Tensor<C>>,
        coord: usize,
    ) -> Result<FormalSum<Tensor<C>>> {
        if self.is_zero() || chain.is_zero() {
            return Ok(chain.zero());
        }
        let (arity, degree) = self.check_homogeneous("chain action")?;
        let chain_arity = chain
            .arity()
            .ok_or(SurjectionError::Inhomogeneous("chain action"))?;
        if !(1..=chain_arity).contains(&coord) {
            return Err(SurjectionError::CoordinateOutOfRange {
                coord,
                arity: chain_arity,
            });
        }
        check_torsion(self.torsion(), chain.torsion())?;
        if C::COMPLEX == Complex::Simplicial && self.convention != Convention::McClureSmith {
            return Err(SurjectionError::NotImplemented {
                operation: "simplicial chain action",
                convention: self.convention,
            });
        }

        let diagonal = chain.iterated_diagonal(arity + degree - 1, coord);
        let surjections: Vec<_> = self.iter().collect();
        let tensors: Vec<_> = diagonal.iter().collect();
        let pairs: Vec<_> = surjections.iter().cartesian_product(tensors.iter()).collect();
        let signed = self.torsion() != Some(2);

        let partial_sums: Vec<FormalSum<Tensor<C>>> = pairs
            .into_maybe_par_iter()
            .map(|(&(k1, v1), &(k2, v2))| {
                let mut result = chain.zero();
                let factors = k2.factors();
                let (left, rest) = factors.split_at(coord - 1);
                let (window, right) = rest.split_at(k1.len());

                let mut joins = Vec::with_capacity(arity);
                for value in 1..=arity as u32 {
                    let cells: Vec<&C> = k1
                        .values()
                        .iter()
                        .zip(window)
                        .filter(|(&v, _)| v == value)
                        .map(|(_, c)| c)
                        .collect();
                    let joined = C::join(&cells);
                    if joined.is_empty() {
                        return result;
                    }
                    joins.push(joined);
                }

                let sign = if signed {
                    let left_degree: usize = left.iter().map(Cell::dimension).sum();
                    action_sign(k1, window) * minus_one_to_the(left_degree * degree)
                } else {
                    1
                };
                for choice in joins.iter().map(|j| j.iter()).multi_cartesian_product() {
                    let coeff: i64 = choice.iter().map(|(_, c)| c).product();
                    let factors = left
                        .iter()
                        .cloned()
                        .chain(choice.into_iter().map(|(cell, _)| cell.clone()))
                        .chain(right.iter().cloned());
                    result.add_term(factors.collect(), sign * coeff * v1 * v2);
                }
                result
            })
            .collect();

        let mut result = chain.zero();
        for sum in partial_sums {
            result += sum;
        }
        tracing::debug!(terms = result.len(), "chain action done");
        Ok(result)
    }
}
