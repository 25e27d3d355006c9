//! Option contract and quote definitions.
//!
//! - [`OptionType`]: call or put, with the `0`/`1` tabular encoding
//! - [`OptionQuote`]: one observed market price plus the other pricing inputs
//! - [`VolPoint`]: a solved implied volatility for one contract
//!
//! # Examples
//!
//! ```
//! use impvol_models::instruments::{OptionQuote, OptionType};
//!
//! let quote = OptionQuote::new("c".parse().unwrap(), 100.0, 100.0, 1.0, 0.05, 10.45);
//! assert_eq!(quote.option_type, OptionType::Call);
//! ```

mod option_type;
mod quote;

pub use option_type::{OptionType, ParseOptionTypeError};
pub use quote::{OptionQuote, VolPoint};
