//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Violated preconditions of the closed-form pricer

use impvol_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// All variants but `NumericalInstability` are invalid-input failures: the
/// Black-Scholes formula is undefined (log of a non-positive ratio, division
/// by `σ√T = 0`) or would propagate NaN. The pricer reports these instead of
/// computing.
///
/// # Variants
/// - `InvalidSpot`: Non-positive or non-finite spot price
/// - `InvalidStrike`: Non-positive or non-finite strike
/// - `InvalidExpiry`: Non-positive or non-finite time to expiry
/// - `InvalidVolatility`: Non-positive or non-finite volatility
/// - `InvalidRate`: Non-finite risk-free rate
/// - `NumericalInstability`: Valid inputs produced a non-finite price
///
/// # Examples
/// ```
/// use impvol_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnalyticalError {
    /// Invalid spot price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid time to expiry.
    #[error("Invalid time to expiry: T = {expiry}")]
    InvalidExpiry {
        /// The invalid time to expiry in years
        expiry: f64,
    },

    /// Invalid volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Non-finite risk-free rate. Any finite rate, negative included, is valid.
    #[error("Invalid risk-free rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// The formula overflowed for inputs that passed validation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the failure
        message: String,
    },
}

impl AnalyticalError {
    /// Returns `true` for the variants that reject an input value.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, AnalyticalError::NumericalInstability { .. })
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::NumericalInstability { message } => {
                PricingError::NumericalInstability(message)
            }
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

/// `Ok(())` when `value` is finite and strictly positive.
#[inline]
pub(crate) fn require_positive(
    value: f64,
    err: impl FnOnce(f64) -> AnalyticalError,
) -> Result<(), AnalyticalError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(err(value))
    }
}
