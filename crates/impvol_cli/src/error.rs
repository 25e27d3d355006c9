//! CLI error types

use impvol_core::types::{DateError, PricingError};
use impvol_models::analytical::AnalyticalError;
use impvol_models::implied::ImpliedVolError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by `impvol` commands
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{file}: missing column(s) {columns}")]
    MissingColumns { file: String, columns: String },

    #[error("No input file produced any rows")]
    NoData,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Date error: {0}")]
    Date(#[from] DateError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

impl From<AnalyticalError> for CliError {
    fn from(err: AnalyticalError) -> Self {
        CliError::Pricing(err.into())
    }
}

impl From<ImpliedVolError> for CliError {
    fn from(err: ImpliedVolError) -> Self {
        CliError::Pricing(err.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_conversions() {
        let err: CliError = AnalyticalError::InvalidSpot { spot: 0.0 }.into();
        assert!(matches!(err, CliError::Pricing(PricingError::InvalidInput(_))));

        let err: CliError = ImpliedVolError::ConvergenceFailure { iterations: 3 }.into();
        assert!(matches!(
            err,
            CliError::Pricing(PricingError::NumericalInstability(_))
        ));
        assert!(err.to_string().contains("3 iterations"));

        let err: CliError = DateError::ParseError("x".to_string()).into();
        assert!(matches!(err, CliError::Date(_)));

        let err: CliError = ConfigError::InvalidSolver("tolerance".to_string()).into();
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_no_bracket_is_a_model_failure() {
        let err: CliError = ImpliedVolError::NoBracket {
            market_price: 150.0,
            lower: 1e-6,
            upper: 5.0,
        }
        .into();
        assert!(matches!(err, CliError::Pricing(PricingError::ModelFailure(_))));
        assert!(err.to_string().starts_with("Pricing error: Model failure"));
    }

    #[test]
    fn test_missing_columns_display() {
        let err = CliError::MissingColumns {
            file: "AAPL_options_2025-08-15.csv".to_string(),
            columns: "lastPrice".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "AAPL_options_2025-08-15.csv: missing column(s) lastPrice"
        );
    }
}
