//! Compare command implementation
//!
//! Runs the reference and accelerated solvers on the same book and reports
//! how far apart they land.

use serde::Serialize;
use shin_core::{calculate_full, ShinConfig, SolverKind};
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::input::OddsInput;
use crate::{CliError, Result};

/// Default agreement tolerance between the two solvers
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

/// Side-by-side result of both solvers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub reference_z: f64,
    pub accelerated_z: f64,
    pub reference_iterations: usize,
    pub accelerated_iterations: usize,
    pub max_probability_difference: f64,
    pub tolerance: f64,
    pub agree: bool,
}

/// Run the compare command
pub fn run(tokens: &[String], tolerance: f64, config: &CliConfig) -> Result<()> {
    let input = OddsInput::parse(tokens)?;
    let comparison = compare(&input.values(), tolerance, &config.solver)?;

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&comparison)?),
        OutputFormat::Table => {
            println!(
                "reference   z = {:.15} ({} iterations)",
                comparison.reference_z, comparison.reference_iterations
            );
            println!(
                "accelerated z = {:.15} ({} iterations)",
                comparison.accelerated_z, comparison.accelerated_iterations
            );
            println!("max |Δp|      = {:e}", comparison.max_probability_difference);
        }
    }

    if comparison.agree {
        info!(
            difference = comparison.max_probability_difference,
            "Solvers agree"
        );
        Ok(())
    } else {
        warn!(
            difference = comparison.max_probability_difference,
            tolerance,
            "Solvers disagree"
        );
        Err(CliError::SolverMismatch {
            difference: comparison.max_probability_difference,
            tolerance,
        })
    }
}

/// Solve `odds` with both strategies under otherwise identical settings
pub fn compare(odds: &[f64], tolerance: f64, base: &ShinConfig) -> Result<Comparison> {
    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(CliError::InvalidArgument(format!(
            "tolerance must be >= 0, got {}",
            tolerance
        )));
    }

    let reference = calculate_full(odds, &base.with_solver(SolverKind::Reference))?;
    let accelerated = calculate_full(odds, &base.with_solver(SolverKind::Accelerated))?;

    let max_probability_difference = reference
        .implied_probabilities
        .iter()
        .zip(&accelerated.implied_probabilities)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0_f64, f64::max);

    let agree = max_probability_difference <= tolerance
        && (reference.z - accelerated.z).abs() <= tolerance;

    Ok(Comparison {
        reference_z: reference.z,
        accelerated_z: accelerated.z,
        reference_iterations: reference.iterations,
        accelerated_iterations: accelerated.iterations,
        max_probability_difference,
        tolerance,
        agree,
    })
}
