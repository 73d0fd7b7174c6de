use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::SurjectionError;

/// The sign conventions of the surjection operad.
///
/// Berger and Fresse, *Combinatorial operad actions on cochains* (2004), and McClure and Smith,
/// *Multivariable cochain operations and little n-cubes* (2003), write down the same operad with
/// different signs for the differential, the symmetric group action and the composition.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Convention {
    #[default]
    #[serde(rename = "Berger-Fresse")]
    BergerFresse,
    #[serde(rename = "McClure-Smith")]
    McClureSmith,
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::BergerFresse => write!(f, "Berger-Fresse"),
            Self::McClureSmith => write!(f, "McClure-Smith"),
        }
    }
}

impl FromStr for Convention {
    type Err = SurjectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Berger-Fresse" => Ok(Self::BergerFresse),
            "McClure-Smith" => Ok(Self::McClureSmith),
            _ => Err(SurjectionError::UnsupportedConvention(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Convention::BergerFresse)]
    #[case(Convention::McClureSmith)]
    fn test_names(#[case] convention: Convention) {
        assert_eq!(convention.to_string().parse::<Convention>(), Ok(convention));
        let json = serde_json::to_string(&convention).unwrap();
        assert_eq!(json, format!("\"{convention}\""));
        assert_eq!(serde_json::from_str::<Convention>(&json).unwrap(), convention);
    }

    #[test]
    fn test_unsupported() {
        assert_eq!(
            "Steenrod".parse::<Convention>(),
            Err(SurjectionError::UnsupportedConvention("Steenrod".to_string()))
        );
        assert_eq!(Convention::default(), Convention::BergerFresse);
    }
}
