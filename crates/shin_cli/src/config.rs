//! CLI configuration management
//!
//! Settings are layered, lowest to highest priority:
//! 1. Default values
//! 2. TOML config file
//! 3. `SHIN_*` environment variables
//! 4. Command-line arguments

use serde::Deserialize;
use shin_core::{ShinConfig, SolverKind};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{CliError, Result};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "shin.toml";

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(CliError::Config(format!(
                "invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                s
            ))),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Output format for command results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::InvalidArgument(format!(
                "Unknown format: {}. Supported: table, json",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Effective CLI configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Solver settings passed to shin_core
    pub solver: ShinConfig,
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Result format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> std::result::Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> std::result::Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

impl CliConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CliError::FileNotFound(path.display().to_string()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Apply `SHIN_*` variables found through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SHIN_MAX_ITERATIONS") {
            self.solver.max_iterations = value.parse().map_err(|_| {
                CliError::Config(format!("SHIN_MAX_ITERATIONS is not an integer: {}", value))
            })?;
        }

        if let Some(value) = lookup("SHIN_CONVERGENCE_THRESHOLD") {
            self.solver.convergence_threshold = value.parse().map_err(|_| {
                CliError::Config(format!(
                    "SHIN_CONVERGENCE_THRESHOLD is not a number: {}",
                    value
                ))
            })?;
        }

        if let Some(value) = lookup("SHIN_SOLVER") {
            self.solver.solver = SolverKind::from_str(&value)?;
        }

        if let Some(value) = lookup("SHIN_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }

        if let Some(value) = lookup("SHIN_FORMAT") {
            self.format = OutputFormat::from_str(&value)?;
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) {
        if let Some(max_iterations) = cli.max_iterations {
            self.solver.max_iterations = max_iterations;
        }
        if let Some(threshold) = cli.convergence_threshold {
            self.solver.convergence_threshold = threshold;
        }
        if cli.force_reference_solver {
            self.solver.solver = SolverKind::Reference;
        }
        if cli.full_output {
            self.solver.full_output = true;
        }
        if let Some(log_level) = cli.log_level {
            self.log_level = log_level;
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.solver.validate()?;
        Ok(())
    }
}

/// Overrides collected from the command line
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Iteration bound override
    pub max_iterations: Option<usize>,
    /// Convergence threshold override
    pub convergence_threshold: Option<f64>,
    /// Force the reference solver
    pub force_reference_solver: bool,
    /// Request the full diagnostic record
    pub full_output: bool,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Output format override
    pub format: Option<OutputFormat>,
}

/// Build configuration from all sources
///
/// An explicit `--config` path must exist; the default `shin.toml` is
/// optional.
pub fn build_config(cli: &CliArgs) -> Result<CliConfig> {
    let mut config = match &cli.config_file {
        Some(path) => CliConfig::from_file(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                CliConfig::from_file(default_path)?
            } else {
                CliConfig::default()
            }
        }
    };

    config.apply_env(|key| std::env::var(key).ok())?;
    config.merge_with_cli(cli);
    config.validate()?;

    Ok(config)
}
