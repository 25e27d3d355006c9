//! Price command implementation
//!
//! Prints the Black-Scholes price of a single European option.

use impvol_models::analytical::price;
use impvol_models::instruments::OptionType;
use tracing::info;

use crate::Result;

/// Run the price command
pub fn run(
    option_type: OptionType,
    spot: f64,
    strike: f64,
    expiry: f64,
    volatility: f64,
    rate: f64,
) -> Result<()> {
    info!(
        %option_type, spot, strike, expiry, volatility, rate,
        "Pricing option"
    );

    let value = price(option_type, spot, strike, expiry, rate, volatility)?;
    println!("{:.6}", value);

    Ok(())
}
