//! Option-chain CSV reading and volatility CSV writing
//!
//! Input files are option-chain dumps with one row per contract and at least
//! `type`, `strike`, `expiry` and a price or volatility column. Extra columns
//! are ignored. Output is a flat `strike,T,type,implied_vol` table with the
//! type encoded `0` for calls and `1` for puts.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use impvol_core::types::{Date, DayCountConvention};
use impvol_models::instruments::{OptionType, VolPoint};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{CliError, Result};

/// Column holding the observed option price
pub const PRICE_COLUMN: &str = "lastPrice";

/// Column holding a provider-computed implied volatility
pub const VOL_COLUMN: &str = "impliedVolatility";

/// Substring marking option-chain dumps inside an input directory
pub const CHAIN_FILE_MARKER: &str = "options";

/// Output header
pub const OUTPUT_HEADER: [&str; 4] = ["strike", "T", "type", "implied_vol"];

/// One option-chain row
///
/// Every field is optional: empty or malformed cells become `None` and the
/// row is dropped later instead of failing the whole file.
#[derive(Debug, Deserialize)]
pub struct ChainRow {
    #[serde(rename = "type", default)]
    pub option_type: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub strike: Option<f64>,
    #[serde(rename = "lastPrice", default, deserialize_with = "csv::invalid_option")]
    pub last_price: Option<f64>,
    #[serde(rename = "impliedVolatility", default, deserialize_with = "csv::invalid_option")]
    pub implied_volatility: Option<f64>,
    #[serde(default)]
    pub expiry: Option<String>,
}

/// Contract terms of a complete row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contract {
    pub option_type: OptionType,
    pub strike: f64,
    pub time_to_expiry: f64,
}

/// Why a row did not become a contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// A required cell was empty or unparseable
    Incomplete,
    /// Time to expiry is zero or negative
    Expired,
}

impl ChainRow {
    /// Resolves type, strike and time to expiry under `day_count`
    pub fn contract(
        &self,
        valuation: Date,
        day_count: DayCountConvention,
    ) -> std::result::Result<Contract, Rejection> {
        let option_type = self
            .option_type
            .as_deref()
            .and_then(|s| s.parse::<OptionType>().ok())
            .ok_or(Rejection::Incomplete)?;
        let strike = self.strike.ok_or(Rejection::Incomplete)?;
        let expiry = self
            .expiry
            .as_deref()
            .and_then(|s| parse_expiry(s).ok())
            .ok_or(Rejection::Incomplete)?;

        let time_to_expiry = day_count.year_fraction(valuation, expiry);
        if time_to_expiry <= 0.0 {
            return Err(Rejection::Expired);
        }

        Ok(Contract {
            option_type,
            strike,
            time_to_expiry,
        })
    }
}

/// Parses an expiry cell, accepting a trailing time component
/// (`2025-08-15 00:00:00` as written by some dumps).
fn parse_expiry(s: &str) -> std::result::Result<Date, impvol_core::types::DateError> {
    let s = s.trim();
    let date_part = s.split(|c: char| c == ' ' || c == 'T').next().unwrap_or(s);
    Date::parse(date_part)
}

/// Row counts for one input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowStats {
    pub rows: usize,
    pub incomplete: usize,
    pub expired: usize,
}

impl RowStats {
    pub fn reject(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Incomplete => self.incomplete += 1,
            Rejection::Expired => self.expired += 1,
        }
    }
}

/// Reads all rows of a chain, checking that `required` columns exist
///
/// Records that do not even parse as CSV are counted as incomplete.
pub fn read_rows<R: Read>(
    reader: R,
    name: &str,
    required: &[&str],
) -> Result<(Vec<ChainRow>, usize)> {
    let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h.trim() == *col))
        .collect();
    if !missing.is_empty() {
        return Err(CliError::MissingColumns {
            file: name.to_string(),
            columns: missing.join(", "),
        });
    }

    let mut rows = Vec::new();
    let mut malformed = 0;
    for record in csv_reader.deserialize::<ChainRow>() {
        match record {
            Ok(row) => rows.push(row),
            Err(e) => {
                debug!(file = name, error = %e, "dropping malformed record");
                malformed += 1;
            }
        }
    }

    Ok((rows, malformed))
}

/// Expands directories into the option-chain files they contain, sorted by
/// name
///
/// Inside a directory only `.csv` files whose name contains
/// [`CHAIN_FILE_MARKER`] are taken (`AAPL_options_2025-08-15.csv`). Files
/// named explicitly are always taken. `exclude` is skipped so a previous
/// output is never read back as input.
pub fn collect_inputs(inputs: &[PathBuf], exclude: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries: Vec<PathBuf> = std::fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_chain_file(path))
                .collect();
            entries.sort();
            files.extend(entries);
        } else if input.exists() {
            files.push(input.clone());
        } else {
            warn!(file = %input.display(), "input not found, skipping");
        }
    }

    let exclude = exclude.canonicalize().ok();
    files.retain(|f| exclude.is_none() || f.canonicalize().ok() != exclude);
    Ok(files)
}

fn is_chain_file(path: &Path) -> bool {
    let is_csv = path.extension().map(|ext| ext == "csv").unwrap_or(false);
    let is_chain = path
        .file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.contains(CHAIN_FILE_MARKER))
        .unwrap_or(false);
    is_csv && is_chain
}

#[derive(Debug, Serialize)]
struct OutputRow {
    strike: f64,
    #[serde(rename = "T")]
    time_to_expiry: f64,
    #[serde(rename = "type")]
    option_type: u8,
    implied_vol: f64,
}

/// Writes points as `strike,T,type,implied_vol`
///
/// The header is written even when there are no points.
pub fn write_points<W: Write>(writer: W, points: &[VolPoint]) -> Result<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(OUTPUT_HEADER)?;
    for point in points {
        csv_writer.serialize(OutputRow {
            strike: point.strike,
            time_to_expiry: point.time_to_expiry,
            option_type: point.option_type.code(),
            implied_vol: point.implied_vol,
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes points to `path`, creating or truncating it
pub fn write_points_file(path: &Path, points: &[VolPoint]) -> Result<()> {
    write_points(File::create(path)?, points)
}
