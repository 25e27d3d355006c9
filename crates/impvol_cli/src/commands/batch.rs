//! Batch command implementation
//!
//! Solves implied volatilities for every quote in a set of option-chain CSV
//! files and writes one merged `strike,T,type,implied_vol` table.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use impvol_core::types::{Date, DayCountConvention};
use impvol_models::implied::{solve_and_filter, ImpliedVolSolver};
use impvol_models::instruments::OptionQuote;
use tracing::{info, warn};

use super::chain::{self, Rejection, RowStats, PRICE_COLUMN};
use crate::config::CliConfig;
use crate::{CliError, Result};

const REQUIRED_COLUMNS: [&str; 4] = ["type", "strike", PRICE_COLUMN, "expiry"];

/// Run the batch command
pub fn run(
    spot: f64,
    inputs: &[PathBuf],
    output: &Path,
    valuation: Date,
    rate: f64,
    config: &CliConfig,
) -> Result<()> {
    if !(spot.is_finite() && spot > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "spot must be positive, got {}",
            spot
        )));
    }
    if !rate.is_finite() {
        return Err(CliError::InvalidArgument(format!(
            "rate must be finite, got {}",
            rate
        )));
    }

    info!("Starting batch implied volatility...");
    info!("  Spot: {}", spot);
    info!("  Rate: {}", rate);
    info!("  Valuation date: {}", valuation);
    info!("  Day count: {}", config.batch.day_count);

    let files = chain::collect_inputs(inputs, output)?;
    let mut quotes = Vec::new();
    let mut loaded = 0;

    for file in &files {
        match load_quotes_file(file, spot, rate, valuation, config.batch.day_count) {
            Ok((file_quotes, stats)) => {
                info!(
                    file = %file.display(),
                    rows = stats.rows,
                    quotes = file_quotes.len(),
                    incomplete = stats.incomplete,
                    expired = stats.expired,
                    "Loaded option chain"
                );
                loaded += 1;
                quotes.extend(file_quotes);
            }
            Err(e) => warn!(file = %file.display(), error = %e, "Skipping file"),
        }
    }

    if loaded == 0 {
        return Err(CliError::NoData);
    }

    let solver = ImpliedVolSolver::new(config.implied_vol_config());
    let report = solve_and_filter(&solver, &quotes, config.band(), &config.parallel());
    info!(
        quotes = quotes.len(),
        solved = report.points.len(),
        failed = report.failures.len(),
        out_of_band = report.out_of_band,
        "Solved implied volatilities"
    );

    chain::write_points_file(output, &report.points)?;
    info!("Saved merged file to: {}", output.display());

    Ok(())
}

fn load_quotes_file(
    path: &Path,
    spot: f64,
    rate: f64,
    valuation: Date,
    day_count: DayCountConvention,
) -> Result<(Vec<OptionQuote>, RowStats)> {
    let file = File::open(path)?;
    load_quotes(file, &path.display().to_string(), spot, rate, valuation, day_count)
}

/// Turns chain rows into quotes at the given spot, rate and valuation date
///
/// Rows missing a type, strike, price or expiry are dropped, as are expired
/// contracts. `day_count` turns expiry dates into years.
pub fn load_quotes<R: Read>(
    reader: R,
    name: &str,
    spot: f64,
    rate: f64,
    valuation: Date,
    day_count: DayCountConvention,
) -> Result<(Vec<OptionQuote>, RowStats)> {
    let (rows, malformed) = chain::read_rows(reader, name, &REQUIRED_COLUMNS)?;
    let mut stats = RowStats {
        rows: rows.len() + malformed,
        incomplete: malformed,
        ..RowStats::default()
    };

    let mut quotes = Vec::with_capacity(rows.len());
    for row in &rows {
        let Some(market_price) = row.last_price else {
            stats.reject(Rejection::Incomplete);
            continue;
        };
        match row.contract(valuation, day_count) {
            Ok(contract) => quotes.push(OptionQuote::new(
                contract.option_type,
                contract.strike,
                spot,
                contract.time_to_expiry,
                rate,
                market_price,
            )),
            Err(rejection) => stats.reject(rejection),
        }
    }

    Ok((quotes, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use impvol_models::analytical::price;
    use impvol_models::instruments::OptionType;

    fn valuation() -> Date {
        Date::from_ymd(2025, 1, 2).unwrap()
    }

    /// Chain priced at the given volatility, expiring 2025-07-02 (181 days).
    fn chain_csv(spot: f64, rate: f64, vol: f64) -> String {
        let t = 181.0 / 365.0;
        let mut csv = String::from("contractSymbol,strike,lastPrice,type,expiry\n");
        for (k, option_type) in [(90.0, "put"), (100.0, "call"), (110.0, "call")] {
            let ot: OptionType = option_type.parse().unwrap();
            let p = price(ot, spot, k, t, rate, vol).unwrap();
            csv.push_str(&format!("X{},{},{},{},2025-07-02\n", k, k, p, option_type));
        }
        csv
    }

    #[test]
    fn test_load_quotes() {
        let data = "\
strike,lastPrice,type,expiry
100,5.0,call,2025-07-02
100,,call,2025-07-02
100,5.0,call,2024-12-20
abc,5.0,put,2025-07-02
";
        let (quotes, stats) = load_quotes(
            data.as_bytes(),
            "mem",
            100.0,
            0.05,
            valuation(),
            DayCountConvention::ActualActual365,
        )
        .unwrap();

        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].spot, 100.0);
        assert_eq!(quotes[0].rate, 0.05);
        assert_eq!(quotes[0].market_price, 5.0);
        assert_relative_eq!(quotes[0].time_to_expiry, 181.0 / 365.0, epsilon = 1e-15);
        assert_eq!(
            stats,
            RowStats {
                rows: 4,
                incomplete: 2,
                expired: 1
            }
        );
    }

    #[test]
    fn test_load_quotes_requires_price_column() {
        let data = "strike,type,expiry,impliedVolatility\n100,call,2025-07-02,0.2\n";
        let result = load_quotes(
            data.as_bytes(),
            "mem",
            100.0,
            0.05,
            valuation(),
            DayCountConvention::default(),
        );
        assert!(matches!(result, Err(CliError::MissingColumns { .. })));
    }

    #[test]
    fn test_run_merges_files_and_skips_bad_ones() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("AAPL_options_a.csv");
        let b = dir.path().join("AAPL_options_b.csv");
        let bad = dir.path().join("AAPL_options_bad.csv");
        std::fs::write(&a, chain_csv(100.0, 0.05, 0.25)).unwrap();
        std::fs::write(&b, chain_csv(100.0, 0.05, 0.4)).unwrap();
        std::fs::write(&bad, "strike,type\n100,call\n").unwrap();
        let output = dir.path().join("AAPL_iv_merged.csv");

        run(
            100.0,
            &[dir.path().to_path_buf()],
            &output,
            valuation(),
            0.05,
            &CliConfig::default(),
        )
        .unwrap();

        let text = std::fs::read_to_string(&output).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("strike,T,type,implied_vol"));

        let rows: Vec<Vec<f64>> = lines
            .map(|l| l.split(',').map(|c| c.parse().unwrap()).collect())
            .collect();
        assert_eq!(rows.len(), 6);

        let expected_types = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        let expected_vols = [0.25, 0.25, 0.25, 0.4, 0.4, 0.4];
        for (i, row) in rows.iter().enumerate() {
            assert_relative_eq!(row[1], 181.0 / 365.0, epsilon = 1e-12);
            assert_eq!(row[2], expected_types[i]);
            assert_relative_eq!(row[3], expected_vols[i], epsilon = 1e-6);
        }
    }

    #[test]
    fn test_run_without_readable_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let bad = dir.path().join("bad.csv");
        std::fs::write(&bad, "strike\n1\n").unwrap();
        let output = dir.path().join("out.csv");

        let result = run(100.0, &[bad], &output, valuation(), 0.05, &CliConfig::default());
        assert!(matches!(result, Err(CliError::NoData)));
        assert!(!output.exists());
    }

    #[test]
    fn test_run_rejects_bad_spot() {
        let dir = tempfile::tempdir().unwrap();
        let result = run(
            0.0,
            &[],
            &dir.path().join("out.csv"),
            valuation(),
            0.05,
            &CliConfig::default(),
        );
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
