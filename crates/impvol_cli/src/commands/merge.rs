//! Merge command implementation
//!
//! Collects provider-computed implied volatilities from option-chain CSV
//! files into the same merged `strike,T,type,implied_vol` table that `batch`
//! writes, without solving anything.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use impvol_core::types::{Date, DayCountConvention};
use impvol_models::implied::VolBand;
use impvol_models::instruments::VolPoint;
use tracing::{info, warn};

use super::chain::{self, Rejection, RowStats, VOL_COLUMN};
use crate::config::CliConfig;
use crate::{CliError, Result};

const REQUIRED_COLUMNS: [&str; 4] = ["type", "strike", VOL_COLUMN, "expiry"];

/// Run the merge command
pub fn run(inputs: &[PathBuf], output: &Path, valuation: Date, config: &CliConfig) -> Result<()> {
    info!("Merging provider implied volatilities...");
    info!("  Valuation date: {}", valuation);
    info!("  Day count: {}", config.batch.day_count);

    let band = config.band();
    let files = chain::collect_inputs(inputs, output)?;
    let mut points = Vec::new();
    let mut loaded = 0;

    for file in &files {
        match load_points_file(file, valuation, config.batch.day_count, band) {
            Ok((file_points, stats, out_of_band)) => {
                info!(
                    file = %file.display(),
                    rows = stats.rows,
                    kept = file_points.len(),
                    incomplete = stats.incomplete,
                    expired = stats.expired,
                    out_of_band,
                    "Loaded option chain"
                );
                loaded += 1;
                points.extend(file_points);
            }
            Err(e) => warn!(file = %file.display(), error = %e, "Skipping file"),
        }
    }

    if loaded == 0 {
        return Err(CliError::NoData);
    }

    chain::write_points_file(output, &points)?;
    info!("Merged CSV saved at: {}", output.display());
    info!("Total samples: {}", points.len());

    Ok(())
}

fn load_points_file(
    path: &Path,
    valuation: Date,
    day_count: DayCountConvention,
    band: VolBand,
) -> Result<(Vec<VolPoint>, RowStats, usize)> {
    let file = File::open(path)?;
    load_points(file, &path.display().to_string(), valuation, day_count, band)
}

/// Reads provider volatilities, keeping live contracts inside `band`
///
/// Returns the points, the row counts and the number of rows dropped for
/// lying outside the band. Only complete, live rows are checked against the
/// band.
pub fn load_points<R: Read>(
    reader: R,
    name: &str,
    valuation: Date,
    day_count: DayCountConvention,
    band: VolBand,
) -> Result<(Vec<VolPoint>, RowStats, usize)> {
    let (rows, malformed) = chain::read_rows(reader, name, &REQUIRED_COLUMNS)?;
    let mut stats = RowStats {
        rows: rows.len() + malformed,
        incomplete: malformed,
        ..RowStats::default()
    };
    let mut out_of_band = 0;

    let mut points = Vec::with_capacity(rows.len());
    for row in &rows {
        let Some(vol) = row.implied_volatility else {
            stats.reject(Rejection::Incomplete);
            continue;
        };
        let contract = match row.contract(valuation, day_count) {
            Ok(contract) => contract,
            Err(rejection) => {
                stats.reject(rejection);
                continue;
            }
        };
        if !band.contains(vol) {
            out_of_band += 1;
            continue;
        }
        points.push(VolPoint {
            strike: contract.strike,
            time_to_expiry: contract.time_to_expiry,
            option_type: contract.option_type,
            implied_vol: vol,
        });
    }

    Ok((points, stats, out_of_band))
}
