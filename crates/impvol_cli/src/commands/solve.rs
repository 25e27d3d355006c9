//! Solve command implementation
//!
//! Prints the implied volatility of a single quote.

use impvol_models::implied::ImpliedVolSolver;
use impvol_models::instruments::OptionQuote;
use tracing::info;

use crate::config::CliConfig;
use crate::Result;

/// Run the solve command
pub fn run(quote: &OptionQuote, config: &CliConfig) -> Result<()> {
    info!(
        option_type = %quote.option_type,
        market_price = quote.market_price,
        spot = quote.spot,
        strike = quote.strike,
        expiry = quote.time_to_expiry,
        rate = quote.rate,
        "Solving for implied volatility"
    );

    let solver = ImpliedVolSolver::new(config.implied_vol_config());
    let vol = solver.solve_quote(quote)?;
    println!("{:.6}", vol);

    if !config.band().contains(vol) {
        info!(vol, "Implied volatility lies outside the configured band");
    }

    Ok(())
}
