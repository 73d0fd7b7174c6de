use serde::Deserialize;
use serde_json::Value;

use super::SurjectionElement;
use crate::{Convention, Result, SurjectionError};

/// The interchange format, for instance
/// `{"convention": "McClure-Smith", "torsion": 2, "terms": [[[1, 2, 1], 1]]}`.
#[derive(Deserialize)]
struct JsonElement {
    #[serde(default)]
    convention: Option<String>,
    #[serde(default)]
    torsion: Option<u32>,
    terms: Vec<(Vec<u32>, i64)>,
}

impl SurjectionElement {
    /// Reads an element from its JSON description. The convention defaults to Berger–Fresse and
    /// the torsion to none.
    pub fn from_json(json: &Value) -> Result<Self> {
        let JsonElement {
            convention,
            torsion,
            terms,
        } = JsonElement::deserialize(json)
            .map_err(|e| SurjectionError::MalformedInput(e.to_string()))?;
        let convention = match convention {
            Some(name) => name
                .parse::<Convention>()
                .map_err(|_| SurjectionError::UnsupportedConvention(name))?,
            None => Convention::default(),
        };
        Self::from_terms(terms, torsion, convention)
    }

    /// The JSON description of `self`, with terms ordered by sequence.
    pub fn to_json(&self) -> Value {
        let terms: Vec<(&[u32], i64)> = self
            .sum
            .sorted_terms()
            .into_iter()
            .map(|(key, value)| (key.values(), value))
            .collect();
        serde_json::json!({
            "convention": self.convention,
            "torsion": self.torsion(),
            "terms": terms,
        })
    }
}
