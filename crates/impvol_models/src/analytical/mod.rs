//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Black-Scholes prices for calls and puts
//! - Standard normal CDF and PDF
//! - `AnalyticalError` for rejected inputs
//!
//! ## Design Principles
//!
//! - **Validate, then compute**: degenerate inputs fail before any logarithm
//! - **Numerical Stability**: erfc-based CDF and an overflow-free d₁

pub mod black_scholes;
pub mod distributions;
pub mod error;

// Re-export main types at module level
pub use black_scholes::{price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::AnalyticalError;
