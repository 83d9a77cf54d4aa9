//! Shin CLI - Implied Probabilities from the Command Line
//!
//! Operational entry point for the shin_core library.
//!
//! # Commands
//!
//! - `shin devig 2.6 2.4 4.3` - De-vig a book given as plain odds
//! - `shin devig HOME=2.6 AWAY=2.4 DRAW=4.3 --full-output` - Labelled book with diagnostics
//! - `shin compare 2.6 2.4 4.3` - Cross-check the reference and accelerated solvers
//! - `shin check` - Show the effective configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

use config::{build_config, CliArgs, LogLevel, OutputFormat};

/// Shin's method for bookmaker odds
#[derive(Parser)]
#[command(name = "shin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SHIN_LOG_LEVEL")]
    log_level: Option<LogLevel>,

    /// Output format (table, json)
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Maximum fixed-point iterations
    #[arg(long, global = true)]
    max_iterations: Option<usize>,

    /// Convergence threshold on successive values of z
    #[arg(long, global = true)]
    threshold: Option<f64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert odds into implied probabilities
    Devig {
        /// Decimal odds, either plain (2.6) or labelled (HOME=2.6)
        #[arg(required = true, num_args = 1..)]
        odds: Vec<String>,

        /// Include z, delta and iteration count
        #[arg(long)]
        full_output: bool,

        /// Use the reference solver instead of the accelerated one
        #[arg(long)]
        reference: bool,
    },

    /// Run both solvers and check that they agree
    Compare {
        /// Decimal odds, either plain (2.6) or labelled (HOME=2.6)
        #[arg(required = true, num_args = 1..)]
        odds: Vec<String>,

        /// Maximum allowed difference between the two solvers
        #[arg(short, long, default_value_t = commands::compare::DEFAULT_TOLERANCE)]
        tolerance: f64,
    },

    /// Check configuration
    Check,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (force_reference_solver, full_output) = match &cli.command {
        Commands::Devig {
            full_output,
            reference,
            ..
        } => (*reference, *full_output),
        _ => (false, false),
    };

    let args = CliArgs {
        config_file: cli.config.clone(),
        max_iterations: cli.max_iterations,
        convergence_threshold: cli.threshold,
        force_reference_solver,
        full_output,
        log_level: cli.log_level,
        format: cli.format,
    };
    let config = build_config(&args)?;

    init_tracing(config.log_level.as_filter_str());
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Devig { odds, .. } => commands::devig::run(&odds, &config),
        Commands::Compare { odds, tolerance } => commands::compare::run(&odds, tolerance, &config),
        Commands::Check => commands::check::run(&config),
    }
}
