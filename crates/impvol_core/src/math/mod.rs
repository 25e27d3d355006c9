//! Numerical methods.
//!
//! - [`solvers`]: Bracketed root finding used to invert pricing formulas

pub mod solvers;
