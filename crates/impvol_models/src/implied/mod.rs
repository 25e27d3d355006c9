//! Implied volatility from observed option prices.
//!
//! - [`ImpliedVolSolver`]: bracketed Brent inversion of the Black-Scholes
//!   price for a single quote
//! - [`implied_volatility`]: one-shot solve with the default bracket
//!   `[1e-6, 5.0]`
//! - [`solve_batch`] / [`solve_and_filter`]: option chains, in parallel above
//!   a size threshold, filtered to a plausible [`VolBand`]
//!
//! Every failure is a typed [`ImpliedVolError`]; nothing is swallowed into a
//! NaN or a zero volatility.

mod batch;
mod error;
mod solver;

pub use batch::{
    solve_and_filter, solve_batch, BatchReport, ParallelConfig, QuoteFailure, VolBand,
    DEFAULT_BAND_MAX, DEFAULT_BAND_MIN, DEFAULT_PARALLEL_THRESHOLD,
};
pub use error::ImpliedVolError;
pub use solver::{
    implied_volatility, ImpliedVolConfig, ImpliedVolSolver, DEFAULT_LOWER_BOUND,
    DEFAULT_UPPER_BOUND,
};
