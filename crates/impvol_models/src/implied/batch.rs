//! Batch implied volatility over option chains.
//!
//! Quotes are independent, so a chain is solved with a rayon parallel map
//! once it is large enough to be worth it. A failing quote never aborts the
//! batch: it is reported against its index and skipped.

use rayon::prelude::*;
use tracing::debug;

use super::{ImpliedVolError, ImpliedVolSolver};
use crate::instruments::{OptionQuote, VolPoint};

/// Default lower edge of the plausible volatility band.
pub const DEFAULT_BAND_MIN: f64 = 0.01;

/// Default upper edge of the plausible volatility band.
pub const DEFAULT_BAND_MAX: f64 = 3.0;

/// Default minimum chain size before solving in parallel.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 64;

/// Closed band of economically plausible volatilities.
///
/// Solved volatilities outside the band are valid roots but are dropped from
/// batch output.
///
/// # Examples
/// ```
/// use impvol_models::implied::VolBand;
///
/// let band = VolBand::default();
/// assert!(band.contains(0.01));
/// assert!(band.contains(3.0));
/// assert!(!band.contains(3.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VolBand {
    /// Smallest accepted volatility (inclusive)
    pub min: f64,
    /// Largest accepted volatility (inclusive)
    pub max: f64,
}

impl Default for VolBand {
    fn default() -> Self {
        Self {
            min: DEFAULT_BAND_MIN,
            max: DEFAULT_BAND_MAX,
        }
    }
}

impl VolBand {
    /// Creates a band.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` or either edge is NaN.
    pub fn new(min: f64, max: f64) -> Self {
        assert!(min <= max, "band minimum must not exceed maximum");
        Self { min, max }
    }

    /// Returns whether `vol` lies in `[min, max]`.
    #[inline]
    pub fn contains(&self, vol: f64) -> bool {
        vol >= self.min && vol <= self.max
    }
}

/// Configuration for parallel execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Minimum number of quotes before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(parallel_threshold: usize) -> Self {
        Self { parallel_threshold }
    }

    /// Forces sequential execution.
    pub fn sequential() -> Self {
        Self {
            parallel_threshold: usize::MAX,
        }
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }
}

/// A quote that produced no implied volatility.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteFailure {
    /// Position of the quote in the input slice
    pub index: usize,
    /// Why it failed
    pub error: ImpliedVolError,
}

/// Outcome of [`solve_and_filter`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// In-band points, in input order
    pub points: Vec<VolPoint>,
    /// Quotes the solver rejected, in input order
    pub failures: Vec<QuoteFailure>,
    /// Number of solved quotes dropped for lying outside the band
    pub out_of_band: usize,
}

impl BatchReport {
    /// Total number of quotes the report accounts for.
    pub fn total(&self) -> usize {
        self.points.len() + self.failures.len() + self.out_of_band
    }
}

/// Solves every quote, preserving input order.
///
/// # Examples
/// ```
/// use impvol_models::implied::{solve_batch, ImpliedVolSolver, ParallelConfig};
/// use impvol_models::instruments::{OptionQuote, OptionType};
///
/// let quotes = [
///     OptionQuote::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 10.4506),
///     OptionQuote::new(OptionType::Call, 100.0, 100.0, 0.0, 0.05, 10.4506),
/// ];
/// let results = solve_batch(&ImpliedVolSolver::with_defaults(), &quotes, &ParallelConfig::default());
/// assert!(results[0].is_ok());
/// assert!(results[1].is_err());
/// ```
pub fn solve_batch(
    solver: &ImpliedVolSolver,
    quotes: &[OptionQuote],
    parallel: &ParallelConfig,
) -> Vec<Result<f64, ImpliedVolError>> {
    if parallel.should_parallelize(quotes.len()) {
        debug!(quotes = quotes.len(), "solving batch in parallel");
        quotes.par_iter().map(|q| solver.solve_quote(q)).collect()
    } else {
        debug!(quotes = quotes.len(), "solving batch sequentially");
        quotes.iter().map(|q| solver.solve_quote(q)).collect()
    }
}

/// Solves every quote and keeps the in-band results.
///
/// Each quote ends up in exactly one of `points`, `failures` or the
/// `out_of_band` count.
pub fn solve_and_filter(
    solver: &ImpliedVolSolver,
    quotes: &[OptionQuote],
    band: VolBand,
    parallel: &ParallelConfig,
) -> BatchReport {
    let mut report = BatchReport::default();

    for (index, (quote, result)) in quotes
        .iter()
        .zip(solve_batch(solver, quotes, parallel))
        .enumerate()
    {
        match result {
            Ok(vol) if band.contains(vol) => report.points.push(quote.to_vol_point(vol)),
            Ok(vol) => {
                debug!(index, vol, strike = quote.strike, "volatility outside band");
                report.out_of_band += 1;
            }
            Err(error) => {
                debug!(index, strike = quote.strike, %error, "no implied volatility");
                report.failures.push(QuoteFailure { index, error });
            }
        }
    }

    debug!(
        points = report.points.len(),
        failures = report.failures.len(),
        out_of_band = report.out_of_band,
        "batch complete"
    );
    report
}
