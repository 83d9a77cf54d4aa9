//! Result containers.

use crate::error::{Result, ShinError};
use crate::solver::SolverOutcome;

/// Field names of [`ImpliedProbabilities`], in declaration order.
pub const FIELD_NAMES: [&str; 4] = ["implied_probabilities", "iterations", "delta", "z"];

/// Full diagnostic output: probabilities plus solver diagnostics.
///
/// Fields are accessible by name or through [`ImpliedProbabilities::get`]
/// with the same string key.
///
/// # Examples
///
/// ```
/// use shin_core::{calculate_full, OutputField, ShinConfig};
///
/// let result = calculate_full(&[2.6, 2.4, 4.3], &ShinConfig::default()).unwrap();
/// assert!((result.z - 0.01694251).abs() < 1e-8);
///
/// match result.get("z").unwrap() {
///     OutputField::Z(z) => assert_eq!(z, result.z),
///     _ => unreachable!(),
/// }
/// assert!(result.get("overround").is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImpliedProbabilities<P> {
    /// Probabilities, shaped like the input odds.
    pub implied_probabilities: P,
    /// Refinement steps taken; 0 for two outcomes.
    pub iterations: usize,
    /// Magnitude of the last update to `z`; 0 for two outcomes.
    pub delta: f64,
    /// Solved bias parameter.
    pub z: f64,
}

/// A field of [`ImpliedProbabilities`] looked up by key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputField<'a, P> {
    /// `"implied_probabilities"`
    ImpliedProbabilities(&'a P),
    /// `"iterations"`
    Iterations(usize),
    /// `"delta"`
    Delta(f64),
    /// `"z"`
    Z(f64),
}

impl<'a, P> OutputField<'a, P> {
    /// Scalar value of the field, if it is one of `iterations`, `delta`, `z`.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            OutputField::ImpliedProbabilities(_) => None,
            OutputField::Iterations(i) => Some(i as f64),
            OutputField::Delta(d) => Some(d),
            OutputField::Z(z) => Some(z),
        }
    }
}

impl<P> ImpliedProbabilities<P> {
    pub(crate) fn from_outcome(implied_probabilities: P, outcome: SolverOutcome) -> Self {
        Self {
            implied_probabilities,
            iterations: outcome.iterations,
            delta: outcome.delta,
            z: outcome.z,
        }
    }

    /// Look up a field by name.
    ///
    /// # Errors
    ///
    /// [`ShinError::KeyNotFound`] for any name outside [`FIELD_NAMES`].
    pub fn get(&self, key: &str) -> Result<OutputField<'_, P>> {
        match key {
            "implied_probabilities" => Ok(OutputField::ImpliedProbabilities(
                &self.implied_probabilities,
            )),
            "iterations" => Ok(OutputField::Iterations(self.iterations)),
            "delta" => Ok(OutputField::Delta(self.delta)),
            "z" => Ok(OutputField::Z(self.z)),
            other => Err(ShinError::key_not_found(other)),
        }
    }

    /// Returns true if `key` names a field.
    pub fn contains_key(&self, key: &str) -> bool {
        FIELD_NAMES.contains(&key)
    }

    /// Field names, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> {
        FIELD_NAMES.into_iter()
    }

    /// Returns true if the solver's last update was within `threshold`.
    pub fn converged(&self, threshold: f64) -> bool {
        self.delta <= threshold
    }

    /// Discard the diagnostics.
    pub fn into_probabilities(self) -> P {
        self.implied_probabilities
    }
}

/// Public return shape: bare probabilities or the full record.
///
/// Produced by [`crate::calculate_implied_probabilities`] according to
/// [`crate::ShinConfig::full_output`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum ShinOutput<P> {
    /// Probabilities only.
    Probabilities(P),
    /// Probabilities with solver diagnostics.
    Full(ImpliedProbabilities<P>),
}

impl<P> ShinOutput<P> {
    /// The probabilities, whichever variant this is.
    pub fn probabilities(&self) -> &P {
        match self {
            ShinOutput::Probabilities(p) => p,
            ShinOutput::Full(full) => &full.implied_probabilities,
        }
    }

    /// Consume and return the probabilities.
    pub fn into_probabilities(self) -> P {
        match self {
            ShinOutput::Probabilities(p) => p,
            ShinOutput::Full(full) => full.implied_probabilities,
        }
    }

    /// The full record, if requested.
    pub fn full(&self) -> Option<&ImpliedProbabilities<P>> {
        match self {
            ShinOutput::Probabilities(_) => None,
            ShinOutput::Full(full) => Some(full),
        }
    }

    /// Returns true for the full-output variant.
    pub fn is_full(&self) -> bool {
        matches!(self, ShinOutput::Full(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ImpliedProbabilities<Vec<f64>> {
        ImpliedProbabilities {
            implied_probabilities: vec![0.6, 0.4],
            iterations: 12,
            delta: 1e-13,
            z: 0.02,
        }
    }

    #[test]
    fn test_get_by_key_matches_fields() {
        let r = record();
        assert_eq!(
            r.get("implied_probabilities").unwrap(),
            OutputField::ImpliedProbabilities(&vec![0.6, 0.4])
        );
        assert_eq!(r.get("iterations").unwrap(), OutputField::Iterations(12));
        assert_eq!(r.get("delta").unwrap(), OutputField::Delta(1e-13));
        assert_eq!(r.get("z").unwrap(), OutputField::Z(0.02));
    }

    #[test]
    fn test_unknown_key() {
        let r = record();
        assert_eq!(
            r.get("probabilities"),
            Err(ShinError::KeyNotFound("probabilities".to_string()))
        );
        assert!(!r.contains_key("Z"));
        assert!(r.contains_key("z"));
    }

    #[test]
    fn test_keys_order() {
        let keys: Vec<_> = record().keys().collect();
        assert_eq!(keys, FIELD_NAMES.to_vec());
    }

    #[test]
    fn test_as_f64() {
        let r = record();
        assert_eq!(r.get("iterations").unwrap().as_f64(), Some(12.0));
        assert_eq!(r.get("implied_probabilities").unwrap().as_f64(), None);
    }

    #[test]
    fn test_converged() {
        let r = record();
        assert!(r.converged(1e-12));
        assert!(!r.converged(1e-14));
    }

    #[test]
    fn test_output_accessors() {
        let bare: ShinOutput<Vec<f64>> = ShinOutput::Probabilities(vec![0.5, 0.5]);
        assert!(!bare.is_full());
        assert!(bare.full().is_none());
        assert_eq!(bare.probabilities(), &vec![0.5, 0.5]);

        let full = ShinOutput::Full(record());
        assert!(full.is_full());
        assert_eq!(full.full().map(|r| r.iterations), Some(12));
        assert_eq!(full.into_probabilities(), vec![0.6, 0.4]);
    }
}
