//! # shin_core: Implied Probabilities via Shin's Method
//!
//! Converts bookmaker decimal odds for a mutually exclusive, exhaustive set
//! of outcomes into de-vigged win probabilities. Shin's model attributes the
//! overround to informed trading, which shortens longshots more than
//! favourites (the favourite-longshot bias), instead of spreading the margin
//! uniformly.
//!
//! ## Pipeline
//!
//! ```text
//! odds ──normaliser──▶ (inverse odds, S) ──solver──▶ z ──transform──▶ probabilities
//! ```
//!
//! - [`normaliser`]: validates odds, computes `1 / odds_i` and their sum `S`
//! - [`solver`]: closed form for two outcomes, fixed-point iteration otherwise
//! - [`transform`]: maps `z` and each inverse odds value to a probability
//!
//! Input shape is handled by [`odds::OddsBook`] adapters, so a `Vec<f64>`
//! yields a `Vec<f64>` and a labelled book yields the same labels. An
//! `IndexMap` book comes back as an `IndexMap` with its keys in insertion
//! order.
//!
//! ## Usage Examples
//!
//! ```rust
//! use shin_core::{calculate_implied_probabilities, ShinConfig, ShinOutput};
//!
//! let odds = vec![("HOME", 2.6), ("AWAY", 2.4), ("DRAW", 4.3)];
//! let config = ShinConfig::default().with_full_output(true);
//!
//! let output = calculate_implied_probabilities(&odds, &config).unwrap();
//! let full = output.full().unwrap();
//!
//! assert_eq!(full.implied_probabilities[0].0, "HOME");
//! assert!((full.implied_probabilities[0].1 - 0.3729941).abs() < 1e-6);
//! assert!((full.z - 0.01694251).abs() < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): rayon reduction in [`solver::AcceleratedSolver`]
//!   for very large books
//! - `serde`: serialisation for configuration, errors and results
//! - `indexmap` (default): [`odds::OddsBook`] for `indexmap::IndexMap`
//!
//! ## Concurrency
//!
//! Every call is pure: no global state, no I/O. Calls may run concurrently
//! from any number of threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod config;
pub mod error;
pub mod normaliser;
pub mod odds;
pub mod result;
pub mod solver;
pub mod transform;

pub use config::{ShinConfig, SolverKind};
pub use error::{Result, ShinError};
pub use odds::OddsBook;
pub use result::{ImpliedProbabilities, OutputField, ShinOutput};
pub use solver::{AcceleratedSolver, BiasSolver, ReferenceSolver, SolverOutcome};

use normaliser::normalise;

/// Compute implied probabilities, shaped according to `config.full_output`.
///
/// # Errors
///
/// - [`ShinError::InvalidInputSize`] for fewer than two odds
/// - [`ShinError::InvalidOddsValue`] for odds below 1.0 or not finite
/// - [`ShinError::InvalidConfig`] if `config` fails validation
/// - [`ShinError::DomainViolation`] if the bias parameter leaves its domain
///
/// Failing to converge within `max_iterations` is not an error.
pub fn calculate_implied_probabilities<B>(
    odds: &B,
    config: &ShinConfig,
) -> Result<ShinOutput<B::Output>>
where
    B: OddsBook + ?Sized,
{
    let full = calculate_full(odds, config)?;
    if config.full_output {
        Ok(ShinOutput::Full(full))
    } else {
        Ok(ShinOutput::Probabilities(full.into_probabilities()))
    }
}

/// Compute implied probabilities with full diagnostics, ignoring
/// `config.full_output`.
pub fn calculate_full<B>(odds: &B, config: &ShinConfig) -> Result<ImpliedProbabilities<B::Output>>
where
    B: OddsBook + ?Sized,
{
    let book = normalise(&odds.odds())?;
    let outcome = solver::solve_bias(&book, config)?;
    finish(odds, &book, outcome)
}

/// Compute implied probabilities with an external solver strategy.
///
/// The strategy is used for three or more outcomes; `config.solver` is
/// ignored.
pub fn calculate_with_solver<B>(
    odds: &B,
    config: &ShinConfig,
    solver: &dyn BiasSolver,
) -> Result<ImpliedProbabilities<B::Output>>
where
    B: OddsBook + ?Sized,
{
    let book = normalise(&odds.odds())?;
    let outcome = solver::solve_bias_with(&book, config, solver)?;
    finish(odds, &book, outcome)
}

/// Implied probabilities with default settings.
///
/// # Examples
///
/// ```
/// let probs = shin_core::implied_probabilities(&[2.6, 2.4, 4.3]).unwrap();
/// assert!((probs.iter().sum::<f64>() - 1.0).abs() < 1e-9);
/// ```
pub fn implied_probabilities<B>(odds: &B) -> Result<B::Output>
where
    B: OddsBook + ?Sized,
{
    calculate_full(odds, &ShinConfig::default()).map(ImpliedProbabilities::into_probabilities)
}

fn finish<B>(
    odds: &B,
    book: &normaliser::NormalisedOdds,
    outcome: SolverOutcome,
) -> Result<ImpliedProbabilities<B::Output>>
where
    B: OddsBook + ?Sized,
{
    let probabilities = transform::implied_probabilities(book, outcome.z)?;
    Ok(ImpliedProbabilities::from_outcome(
        odds.attach(probabilities),
        outcome,
    ))
}
