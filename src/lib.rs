//! The surjection operad of McClure–Smith and Berger–Fresse.
//!
//! A [`SurjectionElement`] is an integral or modular linear combination of surjective sequences
//! such as `(1,2,1,3,1)`. The crate implements the structure of a differential graded operad on
//! these elements: the boundary ([`SurjectionElement::boundary`]), the symmetric group action
//! ([`SurjectionElement::left_multiply`]), operadic composition
//! ([`SurjectionElement::compose`]) and the suspension. Surjection elements act on the
//! Eilenberg–Zilber chains of simplices and cubes ([`SurjectionElement::act_on`]), and
//! [`steenrod_product`] produces the elements representing Steenrod's cup-`i` and power
//! operations.
//!
//! Two sign conventions are in use in the literature, and every element carries a
//! [`Convention`]. Not every operation has been worked out in both conventions. Those that have
//! not fail with [`SurjectionError::NotImplemented`].
//!
//! ```
//! use surjection::{Convention, SurjectionElement};
//!
//! let x: SurjectionElement = "(1,2,1,3,1,3)".parse().unwrap();
//! assert_eq!(x.convention(), Convention::BergerFresse);
//! assert_eq!(
//!     x.boundary().to_string(),
//!     "- (1,2,1,3,1) - (1,2,3,1,3) + (2,1,3,1,3)"
//! );
//! ```
//!
//! The `concurrent` feature parallelizes composition, the chain action and the Steenrod
//! recursion with `rayon`.

pub mod convention;
pub mod error;
pub mod steenrod;
pub mod surjection;
pub mod utils;

pub use convention::Convention;
pub use error::{Result, SurjectionError};
pub use steenrod::{basis, steenrod_operation, steenrod_product, SteenrodProducts};
pub use surjection::{BasisSurjection, Representation, SurjectionElement};

pub use eilenberg_zilber::{
    Cell, ChainElement, Complex, Cube, CubicalEilenbergZilberElement, EilenbergZilberElement,
    Interval, Simplex, Tensor,
};
pub use formal_sum::FormalSum;
pub use symmetric::{Permutation, SymmetricRingElement};
