//! Black-Scholes pricing model for European options.
//!
//! This module provides the closed-form Black-Scholes price for European
//! calls and puts on a non-dividend-paying underlying.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Input Validation
//!
//! `S`, `K`, `T` and `σ` must be finite and strictly positive and `r` finite.
//! Anything else is rejected with [`AnalyticalError`] before a single
//! logarithm is taken. There is no intrinsic-value fallback at `T = 0`.

use super::distributions::norm_cdf;
use super::error::{require_positive, AnalyticalError};
use crate::instruments::OptionType;

/// Black-Scholes model for European option pricing.
///
/// Holds the market side of the formula (spot, rate, volatility); strike and
/// expiry are supplied per call.
///
/// # Examples
/// ```
/// use impvol_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
/// let call = bs.price_call(100.0, 1.0).unwrap();
/// let put = bs.price_put(100.0, 1.0).unwrap();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes {
    /// Spot price (S)
    spot: f64,
    /// Risk-free interest rate (r)
    rate: f64,
    /// Volatility (σ)
    volatility: f64,
}

impl BlackScholes {
    /// Creates a new Black-Scholes model.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate, continuously compounded (any finite value)
    /// * `volatility` - Annualised volatility (must be positive)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use impvol_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0, -0.01, 0.2).is_ok());
    /// assert!(BlackScholes::new(0.0, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: f64, rate: f64, volatility: f64) -> Result<Self, AnalyticalError> {
        require_positive(spot, |spot| AnalyticalError::InvalidSpot { spot })?;

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate });
        }

        require_positive(volatility, |volatility| AnalyticalError::InvalidVolatility {
            volatility,
        })?;

        Ok(Self {
            spot,
            rate,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive strike or expiry.
    pub fn d1(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        validate_contract(strike, expiry)?;
        Ok(d1_d2(self.spot, strike, expiry, self.rate, self.volatility).0)
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    ///
    /// # Errors
    /// `InvalidStrike` / `InvalidExpiry` for non-positive strike or expiry.
    pub fn d2(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        validate_contract(strike, expiry)?;
        Ok(d1_d2(self.spot, strike, expiry, self.rate, self.volatility).1)
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use impvol_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0).unwrap();
    /// assert!((price - 10.4506).abs() < 1e-4);
    ///
    /// // Expired contracts are rejected rather than priced at intrinsic value
    /// assert!(bs.price_call(100.0, 0.0).is_err());
    /// ```
    #[inline]
    pub fn price_call(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(OptionType::Call, strike, expiry)
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// # Examples
    /// ```
    /// use impvol_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0, 0.05, 0.2).unwrap();
    /// let price = bs.price_put(100.0, 1.0).unwrap();
    /// assert!((price - 5.5735).abs() < 1e-4);
    /// ```
    #[inline]
    pub fn price_put(&self, strike: f64, expiry: f64) -> Result<f64, AnalyticalError> {
        self.price(OptionType::Put, strike, expiry)
    }

    /// Computes the price of a European call or put.
    ///
    /// The result is not clamped: at extreme inputs it may come out a few
    /// ulps below zero.
    ///
    /// # Errors
    /// - `InvalidStrike` / `InvalidExpiry` for non-positive strike or expiry
    /// - `NumericalInstability` if the inputs are so extreme that the formula
    ///   overflows
    pub fn price(
        &self,
        option_type: OptionType,
        strike: f64,
        expiry: f64,
    ) -> Result<f64, AnalyticalError> {
        validate_contract(strike, expiry)?;

        let value = price_unchecked(
            option_type,
            self.spot,
            strike,
            expiry,
            self.rate,
            self.volatility,
        );

        if value.is_finite() {
            Ok(value)
        } else {
            Err(AnalyticalError::NumericalInstability {
                message: format!(
                    "{} price is {} for S = {}, K = {}, T = {}, r = {}, σ = {}",
                    option_type, value, self.spot, strike, expiry, self.rate, self.volatility
                ),
            })
        }
    }
}

/// Black-Scholes price of a European option.
///
/// Argument order follows the quote: type, spot, strike, time to expiry,
/// rate, volatility.
///
/// # Errors
/// `AnalyticalError` for any non-positive `spot`, `strike`, `expiry` or
/// `volatility`, or a non-finite `rate`.
///
/// # Examples
/// ```
/// use impvol_models::analytical::price;
/// use impvol_models::instruments::OptionType;
///
/// let call = price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
/// assert!((call - 10.4506).abs() < 1e-4);
///
/// assert!(price(OptionType::Put, 100.0, 100.0, 1.0, 0.05, 0.0).is_err());
/// ```
pub fn price(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
) -> Result<f64, AnalyticalError> {
    BlackScholes::new(spot, rate, volatility)?.price(option_type, strike, expiry)
}

/// Checks the contract side of the inputs.
#[inline]
pub(crate) fn validate_contract(strike: f64, expiry: f64) -> Result<(), AnalyticalError> {
    require_positive(strike, |strike| AnalyticalError::InvalidStrike { strike })?;
    require_positive(expiry, |expiry| AnalyticalError::InvalidExpiry { expiry })
}

/// d₁ and d₂ for already validated inputs.
///
/// The σ²T/2 term is folded as σ√T/2 so very large volatilities do not
/// overflow.
#[inline]
fn d1_d2(spot: f64, strike: f64, expiry: f64, rate: f64, volatility: f64) -> (f64, f64) {
    let vol_sqrt_t = volatility * expiry.sqrt();
    let d1 = ((spot / strike).ln() + rate * expiry) / vol_sqrt_t + 0.5 * vol_sqrt_t;
    (d1, d1 - vol_sqrt_t)
}

/// Closed-form price for already validated inputs.
///
/// Used directly by the implied volatility solver, which validates once and
/// then evaluates many trial volatilities inside a positive bracket.
#[inline]
pub(crate) fn price_unchecked(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
) -> f64 {
    let (d1, d2) = d1_d2(spot, strike, expiry, rate, volatility);
    let discounted_strike = strike * (-rate * expiry).exp();

    match option_type {
        OptionType::Call => spot * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
        OptionType::Put => discounted_strike * norm_cdf(-d2) - spot * norm_cdf(-d1),
    }
}
