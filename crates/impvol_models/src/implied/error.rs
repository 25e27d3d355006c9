//! Implied volatility error types.

use impvol_core::types::{PricingError, SolverError};
use thiserror::Error;

use crate::analytical::AnalyticalError;

/// Reasons an implied volatility could not be produced for a quote.
///
/// Every failure is recoverable at the call site: a batch reports it against
/// the offending quote and carries on.
///
/// # Variants
/// - `InvalidInput`: A pricing input (S, K, T or r) was rejected
/// - `InvalidMarketPrice`: The observed price is non-positive or not finite
/// - `NoBracket`: No volatility in the search bracket reproduces the price
/// - `ConvergenceFailure`: The root finder ran out of iterations
/// - `NumericalInstability`: The objective became non-finite mid-solve
///
/// # Examples
/// ```
/// use impvol_models::implied::{implied_volatility, ImpliedVolError};
/// use impvol_models::instruments::OptionType;
///
/// // A call can never be worth more than the underlying
/// let err = implied_volatility(OptionType::Call, 150.0, 100.0, 100.0, 1.0, 0.05).unwrap_err();
/// assert!(matches!(err, ImpliedVolError::NoBracket { .. }));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImpliedVolError {
    /// A Black-Scholes precondition was violated.
    #[error(transparent)]
    InvalidInput(#[from] AnalyticalError),

    /// Observed market price is non-positive or not finite.
    #[error("Invalid market price: {price}")]
    InvalidMarketPrice {
        /// The rejected price
        price: f64,
    },

    /// The market price lies outside the prices reachable inside the bracket.
    #[error("No volatility in [{lower}, {upper}] reproduces market price {market_price}")]
    NoBracket {
        /// The observed price
        market_price: f64,
        /// Lower volatility bound searched
        lower: f64,
        /// Upper volatility bound searched
        upper: f64,
    },

    /// Root finder exhausted its iteration budget.
    #[error("Implied volatility did not converge after {iterations} iterations")]
    ConvergenceFailure {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Non-finite objective value during the solve.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl ImpliedVolError {
    /// Returns `true` when the quote itself was malformed, as opposed to a
    /// well-formed quote that has no solution.
    pub fn is_invalid_input(&self) -> bool {
        match self {
            ImpliedVolError::InvalidInput(err) => err.is_invalid_input(),
            ImpliedVolError::InvalidMarketPrice { .. } => true,
            _ => false,
        }
    }

    /// Maps a root-finder failure for the given market price and bracket.
    pub(crate) fn from_solver(err: SolverError, market_price: f64, lower: f64, upper: f64) -> Self {
        match err {
            SolverError::NoBracket { .. } => ImpliedVolError::NoBracket {
                market_price,
                lower,
                upper,
            },
            SolverError::MaxIterationsExceeded { iterations } => {
                ImpliedVolError::ConvergenceFailure { iterations }
            }
            SolverError::NumericalInstability(message) => {
                ImpliedVolError::NumericalInstability(message)
            }
        }
    }
}

impl From<ImpliedVolError> for PricingError {
    fn from(err: ImpliedVolError) -> Self {
        match err {
            ImpliedVolError::InvalidInput(err) => err.into(),
            ImpliedVolError::InvalidMarketPrice { .. } => {
                PricingError::InvalidInput(err.to_string())
            }
            ImpliedVolError::NoBracket { .. } => PricingError::ModelFailure(err.to_string()),
            ImpliedVolError::ConvergenceFailure { .. }
            | ImpliedVolError::NumericalInstability(_) => {
                PricingError::NumericalInstability(err.to_string())
            }
        }
    }
}
