//! Implied volatility by Brent inversion of the Black-Scholes price.

use impvol_core::math::solvers::{BrentSolver, SolverConfig};

use super::ImpliedVolError;
use crate::analytical::black_scholes::{price_unchecked, validate_contract};
use crate::analytical::error::require_positive;
use crate::analytical::AnalyticalError;
use crate::instruments::{OptionQuote, OptionType};

/// Default lower end of the volatility search bracket.
pub const DEFAULT_LOWER_BOUND: f64 = 1e-6;

/// Default upper end of the volatility search bracket (500%).
pub const DEFAULT_UPPER_BOUND: f64 = 5.0;

/// Search bracket and stopping rules for implied volatility solves.
///
/// # Examples
/// ```
/// use impvol_models::implied::ImpliedVolConfig;
///
/// let config = ImpliedVolConfig::default();
/// assert_eq!(config.lower_bound, 1e-6);
/// assert_eq!(config.upper_bound, 5.0);
/// assert_eq!(config.solver.max_iterations, 100);
///
/// let narrow = ImpliedVolConfig::default().with_bracket(0.01, 3.0);
/// assert_eq!(narrow.upper_bound, 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpliedVolConfig {
    /// Lowest volatility searched
    pub lower_bound: f64,
    /// Highest volatility searched
    pub upper_bound: f64,
    /// Tolerance on the volatility and iteration budget
    pub solver: SolverConfig<f64>,
}

impl Default for ImpliedVolConfig {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            solver: SolverConfig::default(),
        }
    }
}

impl ImpliedVolConfig {
    /// Creates a configuration with the default bracket.
    pub fn new(solver: SolverConfig<f64>) -> Self {
        Self {
            solver,
            ..Self::default()
        }
    }

    /// Replaces the search bracket.
    ///
    /// # Panics
    ///
    /// Panics unless `0 < lower < upper` and both are finite.
    pub fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        assert!(
            lower.is_finite() && upper.is_finite(),
            "volatility bracket must be finite"
        );
        assert!(lower > 0.0, "lower volatility bound must be positive");
        assert!(lower < upper, "lower volatility bound must be below upper");
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }
}

/// Implied volatility solver.
///
/// Validates a quote once, then runs Brent's method on
/// `f(σ) = price(σ) - market_price` over the configured bracket. Call and put
/// prices are strictly increasing in σ, so a sign change brackets exactly one
/// root.
///
/// # Examples
/// ```
/// use impvol_models::implied::ImpliedVolSolver;
/// use impvol_models::instruments::OptionType;
///
/// let solver = ImpliedVolSolver::with_defaults();
/// let vol = solver
///     .solve(OptionType::Call, 10.4506, 100.0, 100.0, 1.0, 0.05)
///     .unwrap();
/// assert!((vol - 0.2).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolSolver {
    config: ImpliedVolConfig,
    brent: BrentSolver<f64>,
}

impl ImpliedVolSolver {
    /// Creates a solver with the given configuration.
    pub fn new(config: ImpliedVolConfig) -> Self {
        Self {
            config,
            brent: BrentSolver::new(config.solver),
        }
    }

    /// Creates a solver with the default bracket `[1e-6, 5.0]`, tolerance
    /// `1e-10` and 100 iterations.
    pub fn with_defaults() -> Self {
        Self::new(ImpliedVolConfig::default())
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &ImpliedVolConfig {
        &self.config
    }

    /// Solves for the volatility reproducing `market_price`.
    ///
    /// The result lies in the configured bracket. It is not filtered to any
    /// plausibility band; see [`super::VolBand`].
    ///
    /// # Errors
    /// - `InvalidInput` for a non-positive or non-finite spot, strike or
    ///   expiry, or a non-finite rate
    /// - `InvalidMarketPrice` for a non-positive or non-finite price
    /// - `NoBracket` when the price is outside the reachable range
    /// - `ConvergenceFailure` when the iteration budget runs out
    pub fn solve(
        &self,
        option_type: OptionType,
        market_price: f64,
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
    ) -> Result<f64, ImpliedVolError> {
        require_positive(spot, |spot| AnalyticalError::InvalidSpot { spot })?;
        validate_contract(strike, expiry)?;
        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate { rate }.into());
        }
        if !(market_price.is_finite() && market_price > 0.0) {
            return Err(ImpliedVolError::InvalidMarketPrice {
                price: market_price,
            });
        }

        let objective = |vol: f64| {
            price_unchecked(option_type, spot, strike, expiry, rate, vol) - market_price
        };

        let (lower, upper) = (self.config.lower_bound, self.config.upper_bound);
        self.brent
            .find_root(objective, lower, upper)
            .map_err(|err| ImpliedVolError::from_solver(err, market_price, lower, upper))
    }

    /// Solves a quote. Equivalent to [`ImpliedVolSolver::solve`] on its fields.
    pub fn solve_quote(&self, quote: &OptionQuote) -> Result<f64, ImpliedVolError> {
        self.solve(
            quote.option_type,
            quote.market_price,
            quote.spot,
            quote.strike,
            quote.time_to_expiry,
            quote.rate,
        )
    }
}

impl Default for ImpliedVolSolver {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Implied volatility with the default search bracket and tolerance.
///
/// # Examples
/// ```
/// use impvol_models::implied::{implied_volatility, ImpliedVolError};
/// use impvol_models::instruments::OptionType;
///
/// let vol = implied_volatility(OptionType::Put, 5.5735, 100.0, 100.0, 1.0, 0.05).unwrap();
/// assert!((vol - 0.2).abs() < 1e-4);
///
/// let expired = implied_volatility(OptionType::Put, 5.5735, 100.0, 100.0, 0.0, 0.05);
/// assert!(matches!(expired, Err(ImpliedVolError::InvalidInput(_))));
/// ```
pub fn implied_volatility(
    option_type: OptionType,
    market_price: f64,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
) -> Result<f64, ImpliedVolError> {
    ImpliedVolSolver::with_defaults().solve(option_type, market_price, spot, strike, expiry, rate)
}
