//! Root-finding solvers for numerical computation.
//!
//! The workspace inverts monotone pricing functions (price as a function of
//! volatility), so the solvers here are bracketing methods: they need two
//! points whose function values differ in sign and never leave that interval.
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Inverse quadratic interpolation and secant steps with a
//!   bisection fallback; no derivative required
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `x` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Example
//!
//! ```
//! use impvol_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! let solver = BrentSolver::new(SolverConfig::default());
//!
//! // Solve e^x - 2 = 0 (find ln 2)
//! let root = solver.find_root(|x: f64| x.exp() - 2.0, 0.0, 1.0).unwrap();
//! assert!((root - 2.0_f64.ln()).abs() < 1e-10);
//! ```

mod brent;
mod config;

// Re-export public types at module level
pub use brent::BrentSolver;
pub use config::SolverConfig;
