//! Bias parameter solvers.
//!
//! Shin's model explains the overround as insider trading: a fraction `z` of
//! the money is placed by informed bettors. Given inverse odds `io_i` with
//! sum `S`, the bias parameter solves
//!
//! ```text
//! z = (Σ_i sqrt(z² + 4(1 - z)·io_i²/S) - 2) / (n - 2)
//! ```
//!
//! ## Regimes
//!
//! - `n == 2`: exact closed form, see [`closed_form_z`]. No iteration.
//! - `n >= 3`: fixed-point iteration from `z = 0`, delegated to a
//!   [`BiasSolver`] strategy.
//!
//! ## Strategies
//!
//! - [`ReferenceSolver`]: portable scalar loop, the behavioural baseline
//! - [`AcceleratedSolver`]: hoists loop invariants and, with the `parallel`
//!   feature, reduces large books on the rayon pool
//!
//! Both return the same [`SolverOutcome`] shape and agree to within the
//! convergence threshold. Any external strategy implementing [`BiasSolver`]
//! can be plugged in via [`solve_bias_with`].
//!
//! ## Termination
//!
//! Iteration always stops after at most `max_iterations` steps. Hitting the
//! limit is not an error: the caller inspects `delta` and `iterations`.
//! Leaving the domain `z < 1` (or producing a non-finite iterate) is
//! reported as [`ShinError::DomainViolation`].

mod accelerated;
mod reference;

pub use accelerated::{AcceleratedSolver, DEFAULT_PARALLEL_THRESHOLD};
pub use reference::ReferenceSolver;

use crate::config::{ShinConfig, SolverKind};
use crate::error::{Result, ShinError};
use crate::normaliser::NormalisedOdds;

/// Outcome of solving for the bias parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverOutcome {
    /// Bias parameter.
    pub z: f64,
    /// Magnitude of the last update to `z`; 0 for the closed form.
    pub delta: f64,
    /// Refinement steps taken; 0 for the closed form.
    pub iterations: usize,
}

impl SolverOutcome {
    /// Outcome of the two-outcome closed form.
    pub fn closed_form(z: f64) -> Self {
        Self {
            z,
            delta: 0.0,
            iterations: 0,
        }
    }

    /// Returns true if the last update was within `threshold`.
    pub fn converged(&self, threshold: f64) -> bool {
        self.delta <= threshold
    }
}

/// Strategy for the fixed-point iteration on three or more outcomes.
///
/// Implementations must start from `z = 0`, stop as soon as
/// `delta <= convergence_threshold` or `max_iterations` steps were taken, and
/// report `delta = +∞` when no step was taken.
///
/// # Example
///
/// ```
/// use shin_core::solver::{BiasSolver, ReferenceSolver};
///
/// let io = [1.0 / 2.6, 1.0 / 2.4, 1.0 / 4.3];
/// let sum: f64 = io.iter().sum();
/// let outcome = ReferenceSolver.optimise(&io, sum, 3, 1000, 1e-12).unwrap();
/// assert!((outcome.z - 0.01694251).abs() < 1e-8);
/// ```
pub trait BiasSolver: Send + Sync {
    /// Solve for `z`.
    ///
    /// # Arguments
    ///
    /// * `inverse_odds` - `1 / odds_i`, one per outcome
    /// * `sum_inverse_odds` - `S`, the sum of `inverse_odds`
    /// * `n` - number of outcomes, must equal `inverse_odds.len()` and be >= 3
    /// * `max_iterations` - iteration bound
    /// * `convergence_threshold` - stop once `|z_new - z| <= threshold`
    fn optimise(
        &self,
        inverse_odds: &[f64],
        sum_inverse_odds: f64,
        n: usize,
        max_iterations: usize,
        convergence_threshold: f64,
    ) -> Result<SolverOutcome>;

    /// Short name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// Closed-form bias parameter for exactly two outcomes.
///
/// `z = ((S - 1)(d² - S)) / (S(d² - 1))` with `d = io_0 - io_1`. For two
/// outcomes Shin's method coincides with additive de-vigging.
///
/// A book whose inverse odds sum to exactly 1 carries no margin and gives
/// `z = 0`. This also covers books such as `[1.0, 1e300]`, where `d²`
/// rounds to 1 and the formula would otherwise evaluate `0 / 0`.
pub fn closed_form_z(io_0: f64, io_1: f64) -> f64 {
    let sum = io_0 + io_1;
    if sum == 1.0 {
        return 0.0;
    }
    let diff_sq = (io_0 - io_1).powi(2);
    ((sum - 1.0) * (diff_sq - sum)) / (sum * (diff_sq - 1.0))
}

/// Solve for the bias parameter using the strategy selected in `config`.
///
/// # Errors
///
/// - [`ShinError::InvalidConfig`] if `config` fails validation
/// - [`ShinError::DomainViolation`] if `z` leaves its valid domain
pub fn solve_bias(book: &NormalisedOdds, config: &ShinConfig) -> Result<SolverOutcome> {
    match config.solver {
        SolverKind::Reference => solve_bias_with(book, config, &ReferenceSolver),
        SolverKind::Accelerated => solve_bias_with(book, config, &AcceleratedSolver::default()),
    }
}

/// Solve for the bias parameter with an explicit strategy.
///
/// The strategy is only consulted for three or more outcomes.
pub fn solve_bias_with(
    book: &NormalisedOdds,
    config: &ShinConfig,
    solver: &dyn BiasSolver,
) -> Result<SolverOutcome> {
    config.validate()?;

    let io = book.inverse_odds();
    let n = book.n();

    if n == 2 {
        let z = closed_form_z(io[0], io[1]);
        check_domain(z, 0)?;
        tracing::debug!(z, "two-outcome book solved in closed form");
        return Ok(SolverOutcome::closed_form(z));
    }

    let _span = tracing::debug_span!("shin_optimise", solver = solver.name(), n).entered();

    let outcome = solver.optimise(
        io,
        book.sum_inverse_odds(),
        n,
        config.max_iterations,
        config.convergence_threshold,
    )?;

    if outcome.converged(config.convergence_threshold) {
        tracing::debug!(
            z = outcome.z,
            delta = outcome.delta,
            iterations = outcome.iterations,
            "bias parameter converged"
        );
    } else {
        tracing::warn!(
            z = outcome.z,
            delta = outcome.delta,
            iterations = outcome.iterations,
            threshold = config.convergence_threshold,
            "bias parameter did not converge within max_iterations"
        );
    }

    Ok(outcome)
}

/// `z` must be finite and strictly below 1.
pub(crate) fn check_domain(z: f64, iterations: usize) -> Result<()> {
    if z.is_finite() && z < 1.0 {
        Ok(())
    } else {
        Err(ShinError::domain_violation(z, iterations))
    }
}

/// Arguments shared by every strategy must describe a book of three or more.
pub(crate) fn check_iteration_inputs(inverse_odds: &[f64], n: usize) -> Result<()> {
    if n < 3 {
        return Err(ShinError::InvalidInputSize { got: n });
    }
    if inverse_odds.len() != n {
        return Err(ShinError::InvalidConfig(format!(
            "n = {} does not match {} inverse odds",
            n,
            inverse_odds.len()
        )));
    }
    Ok(())
}
