//! # Implied Volatility Models (L2: Business Logic)
//!
//! Black-Scholes pricing and its inversion for implied volatility.
//!
//! This crate provides:
//! - Closed-form Black-Scholes prices for European calls and puts
//! - Option type, market quote and volatility point definitions
//! - Implied volatility by bracketed Brent root finding
//! - Parallel batch solving of option chains with band filtering
//!
//! ## Design Principles
//!
//! - **Explicit failures**: every rejected input or unsolvable quote is a
//!   typed error, never a NaN
//! - **Stateless**: pricing and solving are pure functions of their inputs;
//!   time to expiry is always passed in, the clock is never read here
//!
//! ## Example
//!
//! ```
//! use impvol_models::analytical::price;
//! use impvol_models::implied::implied_volatility;
//! use impvol_models::instruments::OptionType;
//!
//! let p = price(OptionType::Call, 100.0, 100.0, 1.0, 0.05, 0.2).unwrap();
//! let vol = implied_volatility(OptionType::Call, p, 100.0, 100.0, 1.0, 0.05).unwrap();
//! assert!((vol - 0.2).abs() < 1e-8);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod implied;
pub mod instruments;
