//! Core time and error types.
//!
//! This module provides:
//! - `time`: Date wrapper, day count conventions and time-to-expiry derivation
//! - `error`: Structured error types for pricing, date, and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`], [`DayCountConvention`], [`time_to_expiry`] from `time`
//! - [`PricingError`], [`DateError`], [`SolverError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError, SolverError};
pub use time::{time_to_expiry, Date, DayCountConvention};
