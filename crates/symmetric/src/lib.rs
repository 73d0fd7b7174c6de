//! The symmetric groups and their group rings, in the form needed to act on operads.
//!
//! Permutations are written by their images, so `(2, 3, 1)` is the permutation sending `1 ↦ 2`,
//! `2 ↦ 3` and `3 ↦ 1`. Products compose right to left: `(σ * τ)(i) = σ(τ(i))`.

mod permutation;
mod ring;

pub use permutation::{Permutation, PermutationError};
pub use ring::SymmetricRingElement;
