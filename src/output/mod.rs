//! Result output for downstream tools
//!
//! Everything in this module is a thin consumer of a completed
//! [`SimulationResult`](crate::solver::SimulationResult): it reads the
//! arrays and writes files, nothing more. The numerical core does not
//! depend on it.

pub mod export;

pub use export::{export_breakthrough_csv, export_profile_csv, CsvConfig};
