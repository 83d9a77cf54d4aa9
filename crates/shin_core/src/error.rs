//! Error types for Shin's method.
//!
//! All input validation happens before any numerical work, so an error from
//! [`crate::normaliser`] guarantees that no partial result was computed.
//! Failing to reach the convergence threshold is *not* an error; it is
//! reported through the `iterations` and `delta` fields of the result.

use thiserror::Error;

/// Errors produced while computing implied probabilities.
///
/// # Variants
/// - `InvalidInputSize`: fewer than two odds supplied
/// - `InvalidOddsValue`: an odds value below 1.0 or not finite
/// - `KeyNotFound`: unknown field name on the full-output record
/// - `DomainViolation`: the bias parameter left its valid domain
/// - `InvalidConfig`: solver configuration rejected
///
/// # Examples
/// ```
/// use shin_core::ShinError;
///
/// let err = ShinError::InvalidInputSize { got: 1 };
/// assert!(format!("{}", err).contains("at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShinError {
    /// Fewer than two odds values were supplied.
    #[error("Invalid input size: need at least 2 odds, got {got}")]
    InvalidInputSize {
        /// Number of odds provided
        got: usize,
    },

    /// An odds value is below 1.0 or is not a finite number.
    #[error("Invalid odds value {value} at position {index}: all odds must be finite and >= 1")]
    InvalidOddsValue {
        /// Position of the offending value in iteration order
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Lookup of an unrecognised field on the full-output record.
    #[error("Key not found: {0}")]
    KeyNotFound(String),

    /// The bias parameter `z` left the domain `z < 1` or became non-finite.
    #[error("Domain violation: z = {z} after {iterations} iterations")]
    DomainViolation {
        /// Offending value of the bias parameter
        z: f64,
        /// Refinement steps taken when the violation was detected
        iterations: usize,
    },

    /// Solver configuration is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ShinError {
    /// Create an invalid odds value error.
    pub fn invalid_odds(index: usize, value: f64) -> Self {
        Self::InvalidOddsValue { index, value }
    }

    /// Create a domain violation error.
    pub fn domain_violation(z: f64, iterations: usize) -> Self {
        Self::DomainViolation { z, iterations }
    }

    /// Create a key-not-found error.
    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound(key.into())
    }

    /// Returns true if this error was raised while validating input.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInputSize { .. } | Self::InvalidOddsValue { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ShinError>;
