//! CLI error types

use shin_core::ShinError;
use thiserror::Error;

/// Errors surfaced by the `shin` binary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Solvers disagree: max difference {difference:e} exceeds tolerance {tolerance:e}")]
    SolverMismatch { difference: f64, tolerance: f64 },

    #[error(transparent)]
    Shin(#[from] ShinError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialise JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
