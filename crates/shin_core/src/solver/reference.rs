//! Portable scalar fixed-point iteration.

use super::{check_domain, check_iteration_inputs, BiasSolver, SolverOutcome};
use crate::error::Result;
use crate::transform::shin_root;

/// Reference strategy: the fixed-point update evaluated term by term.
///
/// Every iterate is computed as
/// `z_new = (Σ_i sqrt(z² + 4(1 - z)·io_i²/S) - 2) / (n - 2)`
/// with a left-to-right sum over the inputs, so repeated runs on the same
/// platform are bit-for-bit identical. Each root is a `hypot`, so `io_i²`
/// is never formed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceSolver;

impl BiasSolver for ReferenceSolver {
    fn optimise(
        &self,
        inverse_odds: &[f64],
        sum_inverse_odds: f64,
        n: usize,
        max_iterations: usize,
        convergence_threshold: f64,
    ) -> Result<SolverOutcome> {
        check_iteration_inputs(inverse_odds, n)?;

        let denominator = (n - 2) as f64;
        let mut z = 0.0_f64;
        let mut delta = f64::INFINITY;
        let mut iterations = 0;

        while delta > convergence_threshold && iterations < max_iterations {
            let z0 = z;
            z = (inverse_odds
                .iter()
                .map(|&io| shin_root(io, z, sum_inverse_odds))
                .sum::<f64>()
                - 2.0)
                / denominator;
            delta = (z - z0).abs();
            iterations += 1;

            check_domain(z, iterations)?;
            tracing::trace!(iterations, z, delta, "reference step");
        }

        Ok(SolverOutcome {
            z,
            delta,
            iterations,
        })
    }

    fn name(&self) -> &'static str {
        "reference"
    }
}
