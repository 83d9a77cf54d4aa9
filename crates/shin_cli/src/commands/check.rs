//! Check command implementation
//!
//! Prints the effective configuration and compiled-in features.

use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");

    println!("shin {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Solver:");
    println!("  strategy:              {}", config.solver.solver);
    println!("  max_iterations:        {}", config.solver.max_iterations);
    println!("  convergence_threshold: {:e}", config.solver.convergence_threshold);
    println!("  full_output:           {}", config.solver.full_output);
    println!();
    println!("Output:");
    println!("  format:    {}", config.format);
    println!("  log_level: {}", config.log_level);

    config.validate()?;
    println!();
    println!("Configuration OK");

    Ok(())
}
