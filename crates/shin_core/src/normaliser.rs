//! Input validation and inverse-odds computation.

use crate::error::{Result, ShinError};

/// Minimum number of outcomes in a book.
pub const MIN_OUTCOMES: usize = 2;

/// Validated inverse odds of a book together with their sum.
///
/// Constructed only through [`normalise`], so every instance holds at least
/// two finite, strictly positive inverse odds.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalisedOdds {
    inverse_odds: Vec<f64>,
    sum_inverse_odds: f64,
}

impl NormalisedOdds {
    /// Inverse odds `1 / odds_i`, in input order.
    pub fn inverse_odds(&self) -> &[f64] {
        &self.inverse_odds
    }

    /// Sum of the inverse odds, `S`.
    pub fn sum_inverse_odds(&self) -> f64 {
        self.sum_inverse_odds
    }

    /// Number of outcomes.
    pub fn n(&self) -> usize {
        self.inverse_odds.len()
    }

    /// Bookmaker margin, `S - 1`. Negative for an under-round book.
    pub fn overround(&self) -> f64 {
        self.sum_inverse_odds - 1.0
    }
}

/// Validate decimal odds and compute their inverses.
///
/// Size is checked before values, so `[]` and `[0.5]` both report
/// [`ShinError::InvalidInputSize`].
///
/// # Errors
///
/// - [`ShinError::InvalidInputSize`] if fewer than two odds are supplied
/// - [`ShinError::InvalidOddsValue`] if any value is below 1.0 or not finite
///
/// # Examples
///
/// ```
/// use shin_core::normaliser::normalise;
///
/// let book = normalise(&[2.0, 4.0, 4.0]).unwrap();
/// assert_eq!(book.inverse_odds(), &[0.5, 0.25, 0.25]);
/// assert_eq!(book.sum_inverse_odds(), 1.0);
/// ```
pub fn normalise(odds: &[f64]) -> Result<NormalisedOdds> {
    if odds.len() < MIN_OUTCOMES {
        return Err(ShinError::InvalidInputSize { got: odds.len() });
    }

    if let Some((index, &value)) = odds
        .iter()
        .enumerate()
        .find(|(_, o)| !o.is_finite() || **o < 1.0)
    {
        return Err(ShinError::invalid_odds(index, value));
    }

    let inverse_odds: Vec<f64> = odds.iter().map(|o| 1.0 / o).collect();
    let sum_inverse_odds = inverse_odds.iter().sum();

    Ok(NormalisedOdds {
        inverse_odds,
        sum_inverse_odds,
    })
}
