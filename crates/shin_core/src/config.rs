//! Configuration for the implied probability calculation.

use crate::error::{Result, ShinError};

/// Which bias solver strategy to run for books with three or more outcomes.
///
/// Two-outcome books always use the closed-form solution and ignore this
/// setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SolverKind {
    /// Hoisted-invariant iteration, parallel for very large books (default).
    #[default]
    Accelerated,

    /// Portable scalar iteration, evaluated term by term in input order.
    Reference,
}

impl SolverKind {
    /// Lowercase name of the strategy.
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Accelerated => "accelerated",
            SolverKind::Reference => "reference",
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SolverKind {
    type Err = ShinError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "accelerated" | "fast" => Ok(SolverKind::Accelerated),
            "reference" | "ref" => Ok(SolverKind::Reference),
            _ => Err(ShinError::InvalidConfig(format!(
                "unknown solver '{}': expected 'accelerated' or 'reference'",
                s
            ))),
        }
    }
}

/// Configuration for [`crate::calculate_implied_probabilities`].
///
/// # Examples
///
/// ```
/// use shin_core::{ShinConfig, SolverKind};
///
/// let config = ShinConfig::default();
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.convergence_threshold, 1e-12);
///
/// let config = ShinConfig::new()
///     .with_max_iterations(200)
///     .with_full_output(true)
///     .force_reference_solver();
/// assert_eq!(config.solver, SolverKind::Reference);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShinConfig {
    /// Upper bound on fixed-point refinement steps.
    ///
    /// Reaching it is not an error; the last iterate is returned.
    /// Default: 1000
    pub max_iterations: usize,

    /// Iteration stops once `|z_new - z| <= convergence_threshold`.
    ///
    /// Default: 1e-12
    pub convergence_threshold: f64,

    /// Return the diagnostic record instead of bare probabilities.
    ///
    /// Default: false
    pub full_output: bool,

    /// Solver strategy for three or more outcomes.
    ///
    /// Default: [`SolverKind::Accelerated`]
    pub solver: SolverKind,
}

impl Default for ShinConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            convergence_threshold: 1e-12,
            full_output: false,
            solver: SolverKind::Accelerated,
        }
    }
}

impl ShinConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a high-precision configuration.
    ///
    /// Uses tighter threshold (1e-15) and more iterations (5000).
    pub fn high_precision() -> Self {
        Self {
            convergence_threshold: 1e-15,
            max_iterations: 5000,
            ..Self::default()
        }
    }

    /// Create a fast configuration for interactive use.
    ///
    /// Uses relaxed threshold (1e-8) and fewer iterations (100).
    pub fn fast() -> Self {
        Self {
            convergence_threshold: 1e-8,
            max_iterations: 100,
            ..Self::default()
        }
    }

    /// Set the maximum iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence threshold.
    pub fn with_convergence_threshold(mut self, convergence_threshold: f64) -> Self {
        self.convergence_threshold = convergence_threshold;
        self
    }

    /// Request the full diagnostic record.
    pub fn with_full_output(mut self, full_output: bool) -> Self {
        self.full_output = full_output;
        self
    }

    /// Select the solver strategy.
    pub fn with_solver(mut self, solver: SolverKind) -> Self {
        self.solver = solver;
        self
    }

    /// Bypass the accelerated solver and run the reference iteration.
    pub fn force_reference_solver(self) -> Self {
        self.with_solver(SolverKind::Reference)
    }

    /// Validate the configuration.
    ///
    /// `max_iterations == 0` is accepted: the solver then returns its
    /// starting point untouched.
    pub fn validate(&self) -> Result<()> {
        if self.convergence_threshold.is_nan() {
            return Err(ShinError::InvalidConfig(
                "convergence_threshold must not be NaN".to_string(),
            ));
        }
        if self.convergence_threshold < 0.0 {
            return Err(ShinError::InvalidConfig(format!(
                "convergence_threshold must be >= 0, got {}",
                self.convergence_threshold
            )));
        }
        Ok(())
    }
}
