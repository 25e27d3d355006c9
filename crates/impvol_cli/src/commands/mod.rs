//! CLI command implementations
//!
//! Each submodule implements a specific CLI command; `chain` holds the CSV
//! plumbing shared by `batch` and `merge`.

pub mod batch;
pub mod chain;
pub mod merge;
pub mod price;
pub mod solve;
