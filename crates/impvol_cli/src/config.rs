//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables, and
//! command-line flags.

use impvol_core::math::solvers::SolverConfig;
use impvol_core::types::DayCountConvention;
use impvol_models::implied::{
    ImpliedVolConfig, ParallelConfig, VolBand, DEFAULT_BAND_MAX, DEFAULT_BAND_MIN,
    DEFAULT_LOWER_BOUND, DEFAULT_PARALLEL_THRESHOLD, DEFAULT_UPPER_BOUND,
};
use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid solver setting: {0}")]
    InvalidSolver(String),

    #[error("Invalid batch setting: {0}")]
    InvalidBatch(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
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
        write!(f, "{}", self.as_filter_str())
    }
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_day_count<'de, D>(deserializer: D) -> Result<DayCountConvention, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DayCountConvention::from_str(&s).map_err(serde::de::Error::custom)
}

/// `[solver]` section: root-finder stopping rules and volatility bracket
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Absolute tolerance on the solved volatility
    pub tolerance: f64,
    /// Iteration budget per quote
    pub max_iterations: usize,
    /// Lowest volatility searched
    pub lower_bound: f64,
    /// Highest volatility searched
    pub upper_bound: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        let solver = SolverConfig::<f64>::default();
        Self {
            tolerance: solver.tolerance,
            max_iterations: solver.max_iterations,
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
        }
    }
}

/// `[batch]` section: market defaults and output filtering
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BatchSettings {
    /// Risk-free rate used when no `--rate` flag is given
    pub rate: f64,
    /// Smallest volatility kept in output
    pub band_min: f64,
    /// Largest volatility kept in output
    pub band_max: f64,
    /// Minimum chain size before solving in parallel
    pub parallel_threshold: usize,
    /// Day count turning expiry dates into years (`ACT/365` or `ACT/360`)
    #[serde(deserialize_with = "deserialize_day_count")]
    pub day_count: DayCountConvention,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            rate: 0.05,
            band_min: DEFAULT_BAND_MIN,
            band_max: DEFAULT_BAND_MAX,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
            day_count: DayCountConvention::default(),
        }
    }
}

/// CLI configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Solver settings
    pub solver: SolverSettings,
    /// Batch settings
    pub batch: BatchSettings,
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: CliConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `IMPVOL_*` overrides read through `lookup`
    ///
    /// Takes the variable source as a function so overrides can be tested
    /// without touching the process environment.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("IMPVOL_LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(rate) = lookup("IMPVOL_RATE") {
            self.batch.rate = rate
                .trim()
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("IMPVOL_RATE={}", rate)))?;
        }

        if let Some(iterations) = lookup("IMPVOL_MAX_ITERATIONS") {
            self.solver.max_iterations = iterations.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("IMPVOL_MAX_ITERATIONS={}", iterations))
            })?;
        }

        if let Some(day_count) = lookup("IMPVOL_DAY_COUNT") {
            self.batch.day_count = day_count
                .parse()
                .map_err(|_| ConfigError::EnvError(format!("IMPVOL_DAY_COUNT={}", day_count)))?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let solver = &self.solver;
        if !(solver.tolerance.is_finite() && solver.tolerance > 0.0) {
            return Err(ConfigError::InvalidSolver(format!(
                "tolerance must be positive, got {}",
                solver.tolerance
            )));
        }
        if solver.max_iterations == 0 {
            return Err(ConfigError::InvalidSolver(
                "max_iterations must be > 0".to_string(),
            ));
        }
        if !(solver.lower_bound.is_finite()
            && solver.upper_bound.is_finite()
            && solver.lower_bound > 0.0
            && solver.lower_bound < solver.upper_bound)
        {
            return Err(ConfigError::InvalidSolver(format!(
                "volatility bracket [{}, {}] must satisfy 0 < lower < upper",
                solver.lower_bound, solver.upper_bound
            )));
        }

        let batch = &self.batch;
        if !batch.rate.is_finite() {
            return Err(ConfigError::InvalidBatch(format!(
                "rate must be finite, got {}",
                batch.rate
            )));
        }
        if batch.band_min.is_nan() || batch.band_max.is_nan() || batch.band_min > batch.band_max {
            return Err(ConfigError::InvalidBatch(format!(
                "band [{}, {}] is empty",
                batch.band_min, batch.band_max
            )));
        }

        Ok(())
    }

    /// Solver configuration for implied volatility
    ///
    /// Only call on a validated configuration.
    pub fn implied_vol_config(&self) -> ImpliedVolConfig {
        let solver = SolverConfig::new(self.solver.tolerance, self.solver.max_iterations);
        ImpliedVolConfig::new(solver).with_bracket(self.solver.lower_bound, self.solver.upper_bound)
    }

    /// Output volatility band
    pub fn band(&self) -> VolBand {
        VolBand::new(self.batch.band_min, self.batch.band_max)
    }

    /// Parallel execution settings
    pub fn parallel(&self) -> ParallelConfig {
        ParallelConfig::new(self.batch.parallel_threshold)
    }
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments (applied by each command)
/// 2. Environment variables
/// 3. Config file (skipped if it does not exist)
/// 4. Default values
pub fn build_config(path: &Path) -> Result<CliConfig, ConfigError> {
    let mut config = if path.exists() {
        CliConfig::from_file(path)?
    } else {
        CliConfig::default()
    };

    config.apply_env_from(|key| std::env::var(key).ok())?;
    config.validate()?;

    Ok(config)
}
