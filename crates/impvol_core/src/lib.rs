//! # impvol_core: Numerical Foundation for Implied Volatility Estimation
//!
//! ## Layer 1 (Foundation) Role
//!
//! impvol_core serves as the bottom layer of the workspace, providing:
//! - Root-finding solvers: `BrentSolver`, `SolverConfig` (`math::solvers`)
//! - Time types: `Date`, `DayCountConvention`, `time_to_expiry` (`types::time`)
//! - Error types: `PricingError`, `SolverError`, `DateError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other impvol_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use impvol_core::math::solvers::{BrentSolver, SolverConfig};
//! use impvol_core::types::{time_to_expiry, Date};
//!
//! // Year fraction between valuation and expiry (Act/365)
//! let today = Date::from_ymd(2025, 1, 1).unwrap();
//! let expiry = Date::from_ymd(2025, 7, 2).unwrap();
//! let t = time_to_expiry(today, expiry);
//! assert!((t - 182.0 / 365.0).abs() < 1e-12);
//!
//! // Bracketed root finding
//! let solver = BrentSolver::new(SolverConfig::default());
//! let root = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! # assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, DayCountConvention and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
