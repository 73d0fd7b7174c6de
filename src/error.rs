use symmetric::PermutationError;
use thiserror::Error;

use crate::Convention;

pub type Result<T> = std::result::Result<T, SurjectionError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SurjectionError {
    /// Construction data that does not describe a surjection element.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("unsupported convention {0:?}, expected Berger-Fresse or McClure-Smith")]
    UnsupportedConvention(String),

    /// The operation has no sign rule under the given convention.
    #[error("{operation} is not implemented for the {convention} convention")]
    NotImplemented {
        operation: &'static str,
        convention: Convention,
    },

    /// The operation needs a single arity and degree.
    #[error("{0} is only defined for homogeneous elements")]
    Inhomogeneous(&'static str),

    #[error("unequal torsion: {left:?} and {right:?}")]
    TorsionMismatch {
        left: Option<u32>,
        right: Option<u32>,
    },

    #[error("unequal arity: {left:?} and {right:?}")]
    ArityMismatch {
        left: Option<usize>,
        right: Option<usize>,
    },

    #[error("coordinate {coord} is out of range for arity {arity}")]
    CoordinateOutOfRange { coord: usize, arity: usize },

    #[error("invalid Steenrod operation: {0}")]
    InvalidSteenrodOperation(String),
}

impl From<PermutationError> for SurjectionError {
    fn from(err: PermutationError) -> Self {
        Self::MalformedInput(err.to_string())
    }
}

pub(crate) fn check_torsion(left: Option<u32>, right: Option<u32>) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        Err(SurjectionError::TorsionMismatch { left, right })
    }
}
