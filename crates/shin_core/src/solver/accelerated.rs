//! Accelerated fixed-point iteration.

use super::{check_domain, check_iteration_inputs, BiasSolver, SolverOutcome};
use crate::error::Result;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Book size from which the `parallel` feature switches to rayon.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Accelerated strategy.
///
/// Precomputes `c_i = 2·io_i/sqrt(S)` once so each step evaluates
/// `hypot(z, c_i·sqrt(1 - z))` with the iterate-dependent terms hoisted out
/// of the sum. Squares of the inverse odds are never formed, so very long
/// odds do not underflow. With the `parallel` feature, books with at least
/// `parallel_threshold` outcomes are reduced on the rayon thread pool.
///
/// The summation order differs from [`super::ReferenceSolver`], so results
/// agree to within the convergence threshold rather than bit-for-bit. For
/// a fixed input and thread pool the result is still deterministic.
#[derive(Debug, Clone, Copy)]
pub struct AcceleratedSolver {
    parallel_threshold: usize,
}

impl Default for AcceleratedSolver {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl AcceleratedSolver {
    /// Create a solver with the default parallel threshold.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the book size at which parallel reduction kicks in.
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Book size at which parallel reduction kicks in.
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    #[cfg(feature = "parallel")]
    fn sum_roots(&self, scaled: &[f64], z: f64, root_one_minus_z: f64) -> f64 {
        if scaled.len() >= self.parallel_threshold {
            scaled
                .par_iter()
                .map(|c| z.hypot(c * root_one_minus_z))
                .sum()
        } else {
            sum_roots_serial(scaled, z, root_one_minus_z)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn sum_roots(&self, scaled: &[f64], z: f64, root_one_minus_z: f64) -> f64 {
        sum_roots_serial(scaled, z, root_one_minus_z)
    }
}

#[inline]
fn sum_roots_serial(scaled: &[f64], z: f64, root_one_minus_z: f64) -> f64 {
    scaled.iter().map(|c| z.hypot(c * root_one_minus_z)).sum()
}

impl BiasSolver for AcceleratedSolver {
    fn optimise(
        &self,
        inverse_odds: &[f64],
        sum_inverse_odds: f64,
        n: usize,
        max_iterations: usize,
        convergence_threshold: f64,
    ) -> Result<SolverOutcome> {
        check_iteration_inputs(inverse_odds, n)?;

        let scale = 2.0 / sum_inverse_odds.sqrt();
        let scaled: Vec<f64> = inverse_odds.iter().map(|io| scale * io).collect();
        let inv_denominator = 1.0 / (n - 2) as f64;

        let mut z = 0.0_f64;
        let mut delta = f64::INFINITY;
        let mut iterations = 0;

        while delta > convergence_threshold && iterations < max_iterations {
            let z_new = (self.sum_roots(&scaled, z, (1.0 - z).sqrt()) - 2.0) * inv_denominator;
            delta = (z_new - z).abs();
            z = z_new;
            iterations += 1;

            check_domain(z, iterations)?;
        }

        tracing::trace!(iterations, z, delta, "accelerated iteration finished");

        Ok(SolverOutcome {
            z,
            delta,
            iterations,
        })
    }

    fn name(&self) -> &'static str {
        "accelerated"
    }
}
