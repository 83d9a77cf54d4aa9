//! Mapping from the solved bias parameter to implied probabilities.

use crate::error::{Result, ShinError};
use crate::normaliser::NormalisedOdds;

/// Shin implied probability of a single outcome.
///
/// `p = (sqrt(z² + 4(1 - z)·io²/S) - z) / (2(1 - z))`
///
/// The root is evaluated without squaring `io`, and for `z >= 0` the
/// subtraction is rationalised to `2·io² / (S·(root + z))`, so very long
/// odds keep a positive probability instead of cancelling to zero. With
/// `z = 0` and a fair book (`S = 1`) the probability is `io` itself.
///
/// # Examples
///
/// ```
/// use shin_core::transform::shin_probability;
///
/// let p = shin_probability(0.25, 0.0, 1.0);
/// assert!((p - 0.25).abs() < 1e-15);
/// ```
#[inline]
pub fn shin_probability(inverse_odds: f64, z: f64, sum_inverse_odds: f64) -> f64 {
    let root = shin_root(inverse_odds, z, sum_inverse_odds);
    if z >= 0.0 {
        2.0 * inverse_odds * (inverse_odds / (sum_inverse_odds * (root + z)))
    } else {
        (root - z) / (2.0 * (1.0 - z))
    }
}

/// `sqrt(z² + 4(1 - z)·io²/S)`, computed as a `hypot` so that `io²` is
/// never formed. Requires `z < 1`.
#[inline]
pub(crate) fn shin_root(inverse_odds: f64, z: f64, sum_inverse_odds: f64) -> f64 {
    z.hypot(2.0 * inverse_odds * ((1.0 - z) / sum_inverse_odds).sqrt())
}

/// Implied probabilities for every outcome of `book`, in input order.
///
/// # Errors
///
/// [`ShinError::DomainViolation`] if `z` is outside its domain or any
/// probability comes out non-finite.
pub fn implied_probabilities(book: &NormalisedOdds, z: f64) -> Result<Vec<f64>> {
    crate::solver::check_domain(z, 0)?;

    let sum = book.sum_inverse_odds();
    let probabilities: Vec<f64> = book
        .inverse_odds()
        .iter()
        .map(|&io| shin_probability(io, z, sum))
        .collect();

    if probabilities.iter().any(|p| !p.is_finite()) {
        return Err(ShinError::domain_violation(z, 0));
    }

    Ok(probabilities)
}
