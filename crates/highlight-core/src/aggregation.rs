//! Aggregation policies for collapsing per-reference scores into one value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// How multiple per-reference scores collapse into a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    /// Best matching reference.
    #[default]
    Max,
    /// Arithmetic mean.
    Average,
    /// Harmonic mean. Collapses to 0.0 when any value is non-positive.
    Harmonic,
}

impl Aggregation {
    /// Reduce a slice of scores. Returns `None` for an empty slice.
    pub fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let reduced = match self {
            Self::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Average => values.iter().sum::<f64>() / values.len() as f64,
            Self::Harmonic => {
                if values.iter().any(|&v| v <= 0.0) {
                    0.0
                } else {
                    values.len() as f64 / values.iter().map(|v| 1.0 / v).sum::<f64>()
                }
            }
        };
        Some(reduced)
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Max => write!(f, "max"),
            Self::Average => write!(f, "average"),
            Self::Harmonic => write!(f, "harmonic"),
        }
    }
}

impl FromStr for Aggregation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "max" => Ok(Self::Max),
            "average" => Ok(Self::Average),
            "harmonic" => Ok(Self::Harmonic),
            other => Err(Error::Config(format!(
                "Invalid aggregation parameter: {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values_agree() {
        let values = [0.5, 0.5, 0.5];
        for agg in [Aggregation::Max, Aggregation::Average, Aggregation::Harmonic] {
            let v = agg.reduce(&values).unwrap();
            assert!((v - 0.5).abs() < 1e-12, "{} gave {}", agg, v);
        }
    }

    #[test]
    fn test_reducers() {
        let values = [0.2, 0.4, 0.8];
        assert!((Aggregation::Max.reduce(&values).unwrap() - 0.8).abs() < 1e-12);
        assert!((Aggregation::Average.reduce(&values).unwrap() - 1.4 / 3.0).abs() < 1e-12);
        // 3 / (5 + 2.5 + 1.25)
        let harmonic = Aggregation::Harmonic.reduce(&values).unwrap();
        assert!((harmonic - 3.0 / 8.75).abs() < 1e-12);
    }

    #[test]
    fn test_harmonic_guards_non_positive() {
        assert_eq!(Aggregation::Harmonic.reduce(&[0.5, 0.0]), Some(0.0));
        assert_eq!(Aggregation::Harmonic.reduce(&[0.5, -0.2]), Some(0.0));
    }

    #[test]
    fn test_empty_slice() {
        assert_eq!(Aggregation::Max.reduce(&[]), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("average".parse::<Aggregation>().unwrap(), Aggregation::Average);
        let err = "median".parse::<Aggregation>().unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_serde_rejects_unknown() {
        let ok: Aggregation = serde_json::from_str("\"harmonic\"").unwrap();
        assert_eq!(ok, Aggregation::Harmonic);
        assert!(serde_json::from_str::<Aggregation>("\"mode\"").is_err());
    }
}
