//! Devig command implementation
//!
//! Converts a book of decimal odds into Shin implied probabilities.

use serde::Serialize;
use shin_core::{calculate_implied_probabilities, ShinOutput, SolverOutcome};
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::input::OddsInput;
use crate::Result;

/// One outcome of the de-vigged book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRow {
    pub label: String,
    pub odds: f64,
    pub probability: f64,
    pub fair_odds: f64,
}

/// Solver diagnostics, present with `--full-output`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostics {
    pub z: f64,
    pub delta: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// Everything the devig command reports
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DevigReport {
    pub solver: String,
    pub overround: f64,
    pub outcomes: Vec<OutcomeRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diagnostics: Option<Diagnostics>,
}

/// Run the devig command
pub fn run(tokens: &[String], config: &CliConfig) -> Result<()> {
    let input = OddsInput::parse(tokens)?;
    info!(outcomes = input.len(), solver = %config.solver.solver, "De-vigging book");

    let report = build_report(&input, config)?;

    match config.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Table => print_table(&report),
    }

    Ok(())
}

/// Compute the report without printing it
pub fn build_report(input: &OddsInput, config: &CliConfig) -> Result<DevigReport> {
    let values = input.values();
    let labels = input.labels();

    // Run through the adapter matching the input shape; both are flattened
    // into per-outcome rows afterwards.
    let (probabilities, record) = match input {
        OddsInput::Ordered(odds) => {
            split(calculate_implied_probabilities(odds, &config.solver)?, |p: Vec<f64>| p)
        }
        OddsInput::Labelled(pairs) => split(
            calculate_implied_probabilities(pairs, &config.solver)?,
            |p: Vec<(String, f64)>| p.into_iter().map(|(_, v)| v).collect(),
        ),
    };

    let outcomes = labels
        .into_iter()
        .zip(values.iter())
        .zip(probabilities)
        .map(|((label, &odds), probability)| OutcomeRow {
            label,
            odds,
            probability,
            fair_odds: 1.0 / probability,
        })
        .collect();

    let overround = values.iter().map(|o| 1.0 / o).sum::<f64>() - 1.0;
    let threshold = config.solver.convergence_threshold;

    Ok(DevigReport {
        solver: config.solver.solver.to_string(),
        overround,
        outcomes,
        diagnostics: record.map(|r| Diagnostics {
            z: r.z,
            delta: r.delta,
            iterations: r.iterations,
            converged: r.converged(threshold),
        }),
    })
}

/// Flatten either output variant into probabilities plus optional diagnostics
fn split<P, F>(output: ShinOutput<P>, flatten: F) -> (Vec<f64>, Option<SolverOutcome>)
where
    F: FnOnce(P) -> Vec<f64>,
{
    match output {
        ShinOutput::Probabilities(p) => (flatten(p), None),
        ShinOutput::Full(full) => {
            let outcome = SolverOutcome {
                z: full.z,
                delta: full.delta,
                iterations: full.iterations,
            };
            (flatten(full.implied_probabilities), Some(outcome))
        }
    }
}

fn print_table(report: &DevigReport) {
    println!("\n┌────────────┬────────────┬─────────────┬────────────┐");
    println!("│ Outcome    │ Odds       │ Probability │ Fair odds  │");
    println!("├────────────┼────────────┼─────────────┼────────────┤");
    for row in &report.outcomes {
        println!(
            "│ {:<10} │ {:>10.3} │ {:>11.7} │ {:>10.3} │",
            row.label, row.odds, row.probability, row.fair_odds
        );
    }
    println!("└────────────┴────────────┴─────────────┴────────────┘");
    println!("Overround: {:.4}%", report.overround * 100.0);

    if let Some(d) = &report.diagnostics {
        println!("z:          {:.10}", d.z);
        println!("delta:      {:e}", d.delta);
        println!("iterations: {}", d.iterations);
        if !d.converged {
            println!("warning: solver stopped before reaching the convergence threshold");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use shin_core::ShinError;

    fn full_config() -> CliConfig {
        let mut config = CliConfig::default();
        config.solver.full_output = true;
        config
    }

    #[test]
    fn test_report_labelled() {
        let input = OddsInput::parse(&["HOME=2.6", "AWAY=2.4", "DRAW=4.3"]).unwrap();
        let report = build_report(&input, &full_config()).unwrap();

        let labels: Vec<_> = report.outcomes.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["HOME", "AWAY", "DRAW"]);
        assert_relative_eq!(report.outcomes[0].probability, 0.3729941, epsilon = 1e-6);
        assert_relative_eq!(report.outcomes[1].probability, 0.4047794, epsilon = 1e-6);
        assert_relative_eq!(report.outcomes[2].probability, 0.2222265, epsilon = 1e-6);

        let diagnostics = report.diagnostics.unwrap();
        assert_relative_eq!(diagnostics.z, 0.01694251, epsilon = 1e-8);
        assert!(diagnostics.converged);
    }

    #[test]
    fn test_report_without_diagnostics() {
        let input = OddsInput::parse(&["1.9", "1.9"]).unwrap();
        let report = build_report(&input, &CliConfig::default()).unwrap();
        assert!(report.diagnostics.is_none());
        assert_relative_eq!(report.outcomes[0].probability, 0.5, epsilon = 1e-12);
        assert_relative_eq!(report.outcomes[0].fair_odds, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_report_propagates_validation_error() {
        let input = OddsInput::parse(&["0.9", "0.1"]).unwrap();
        let result = build_report(&input, &CliConfig::default());
        assert!(matches!(
            result,
            Err(crate::CliError::Shin(ShinError::InvalidOddsValue { .. }))
        ));
    }

    #[test]
    fn test_report_serialises() {
        let input = OddsInput::parse(&["2.6", "2.4", "4.3"]).unwrap();
        let report = build_report(&input, &CliConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"].as_array().map(|a| a.len()), Some(3));
        assert!(json.get("diagnostics").is_none());
    }
}
