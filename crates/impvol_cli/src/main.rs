//! impvol - Command Line Operations for Implied Volatility
//!
//! This is the operational entry point for the implied volatility library.
//!
//! # Commands
//!
//! - `impvol price` - Black-Scholes price of one option
//! - `impvol solve` - Implied volatility of one quote
//! - `impvol batch --spot <S> --input <file>... --output <file>` - Solve option
//!   chains into a merged volatility table
//! - `impvol merge --input <file>... --output <file>` - Merge provider
//!   volatilities into the same table
//!
//! # Architecture
//!
//! As the **S**ervice layer, this crate is the only place that touches files,
//! the environment, or the clock. Everything it computes goes through
//! `impvol_models`.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use impvol_core::types::Date;
use impvol_models::instruments::{OptionQuote, OptionType};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;

pub use error::{CliError, Result};

/// Black-Scholes implied volatility CLI
#[derive(Parser)]
#[command(name = "impvol")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./impvol.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a European option
    Price {
        /// Option type (call, c, put, p)
        #[arg(short = 't', long = "type")]
        option_type: OptionType,

        /// Spot price of the underlying
        #[arg(short, long)]
        spot: f64,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to expiry in years
        #[arg(short, long)]
        expiry: f64,

        /// Volatility (annualised, e.g. 0.2)
        #[arg(long)]
        vol: f64,

        /// Risk-free rate (defaults to the configured rate)
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },

    /// Solve for the implied volatility of one quote
    Solve {
        /// Option type (call, c, put, p)
        #[arg(short = 't', long = "type")]
        option_type: OptionType,

        /// Observed option price
        #[arg(short, long)]
        price: f64,

        /// Spot price of the underlying
        #[arg(short, long)]
        spot: f64,

        /// Strike price
        #[arg(short = 'k', long)]
        strike: f64,

        /// Time to expiry in years
        #[arg(short, long)]
        expiry: f64,

        /// Risk-free rate (defaults to the configured rate)
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },

    /// Solve implied volatilities for option-chain CSV files
    Batch {
        /// Spot price of the underlying
        #[arg(short, long)]
        spot: f64,

        /// Option-chain CSV files or directories of them
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Merged output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Valuation date (YYYY-MM-DD, defaults to today)
        #[arg(short = 'd', long)]
        valuation_date: Option<String>,

        /// Risk-free rate (defaults to the configured rate)
        #[arg(short, long, allow_hyphen_values = true)]
        rate: Option<f64>,
    },

    /// Merge provider implied volatilities from option-chain CSV files
    Merge {
        /// Option-chain CSV files or directories of them
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<PathBuf>,

        /// Merged output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Valuation date (YYYY-MM-DD, defaults to today)
        #[arg(short = 'd', long)]
        valuation_date: Option<String>,
    },
}

/// Initialise tracing
///
/// `--verbose` forces debug; otherwise `RUST_LOG` wins over the configured
/// level. Logs go to stderr so command output stays pipeable.
fn init_tracing(verbose: bool, configured: &str) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(configured))
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Configuration file read when `--config` is not given
const DEFAULT_CONFIG_PATH: &str = "impvol.toml";

/// Loads the configuration
///
/// An explicit `--config` path must exist; the default path is optional.
fn load_config(path: Option<&Path>) -> Result<config::CliConfig> {
    match path {
        Some(path) if !path.is_file() => Err(CliError::FileNotFound(path.display().to_string())),
        Some(path) => Ok(config::build_config(path)?),
        None => Ok(config::build_config(Path::new(DEFAULT_CONFIG_PATH))?),
    }
}

fn valuation_date(arg: Option<&str>) -> Result<Date> {
    match arg {
        Some(s) => Ok(Date::parse(s)?),
        None => Ok(Date::today()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_tracing(cli.verbose, config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!(?config, "Loaded configuration");

    let default_rate = config.batch.rate;

    match cli.command {
        Commands::Price {
            option_type,
            spot,
            strike,
            expiry,
            vol,
            rate,
        } => commands::price::run(
            option_type,
            spot,
            strike,
            expiry,
            vol,
            rate.unwrap_or(default_rate),
        ),
        Commands::Solve {
            option_type,
            price,
            spot,
            strike,
            expiry,
            rate,
        } => {
            let quote = OptionQuote::new(
                option_type,
                strike,
                spot,
                expiry,
                rate.unwrap_or(default_rate),
                price,
            );
            commands::solve::run(&quote, &config)
        }
        Commands::Batch {
            spot,
            input,
            output,
            valuation_date: date,
            rate,
        } => commands::batch::run(
            spot,
            &input,
            &output,
            valuation_date(date.as_deref())?,
            rate.unwrap_or(default_rate),
            &config,
        ),
        Commands::Merge {
            input,
            output,
            valuation_date: date,
        } => commands::merge::run(&input, &output, valuation_date(date.as_deref())?, &config),
    }
}
