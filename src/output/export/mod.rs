//! Export of simulation results to plain-data formats

mod csv;

pub use csv::{export_breakthrough_csv, export_profile_csv, CsvConfig};
