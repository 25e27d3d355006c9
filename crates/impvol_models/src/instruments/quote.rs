//! Market quotes and solved volatility points.

use super::OptionType;

/// One observed market price of a European option together with every other
/// Black-Scholes input.
///
/// Plain value type. Validation happens when the quote is priced or solved,
/// so a quote read from a data feed can be carried around as-is and reported
/// on if it turns out to be degenerate.
///
/// # Examples
/// ```
/// use impvol_models::instruments::{OptionQuote, OptionType};
///
/// let quote = OptionQuote::new(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 10.4506);
/// assert_eq!(quote.strike, 100.0);
/// assert!((quote.moneyness() - 1.0).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionQuote {
    /// Call or put
    pub option_type: OptionType,
    /// Strike price (K)
    pub strike: f64,
    /// Spot price of the underlying (S)
    pub spot: f64,
    /// Time to expiry in years (T)
    pub time_to_expiry: f64,
    /// Continuously compounded risk-free rate (r)
    pub rate: f64,
    /// Observed option price
    pub market_price: f64,
}

impl OptionQuote {
    /// Creates a new quote.
    pub fn new(
        option_type: OptionType,
        strike: f64,
        spot: f64,
        time_to_expiry: f64,
        rate: f64,
        market_price: f64,
    ) -> Self {
        Self {
            option_type,
            strike,
            spot,
            time_to_expiry,
            rate,
            market_price,
        }
    }

    /// Spot over strike, S / K.
    #[inline]
    pub fn moneyness(&self) -> f64 {
        self.spot / self.strike
    }

    /// Attaches a solved volatility to this quote's contract terms.
    pub fn to_vol_point(&self, implied_vol: f64) -> VolPoint {
        VolPoint {
            strike: self.strike,
            time_to_expiry: self.time_to_expiry,
            option_type: self.option_type,
            implied_vol,
        }
    }
}

/// An implied volatility for one contract: a single output row.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolPoint {
    /// Strike price
    pub strike: f64,
    /// Time to expiry in years
    pub time_to_expiry: f64,
    /// Call or put
    pub option_type: OptionType,
    /// Implied volatility
    pub implied_vol: f64,
}
