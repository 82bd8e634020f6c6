//! Solve the default column and export the results
//!
//! Produces two CSV files next to the working directory:
//!
//! - `profile_final.csv`: both concentration profiles at the end of the run
//! - `breakthrough_outlet.csv`: dissolved concentration over time at the
//!   column outlet
//!
//! ```bash
//! cargo run --example breakthrough
//! ```

use nh4_rs::output::export::{export_breakthrough_csv, export_profile_csv, CsvConfig};
use nh4_rs::physics::SoilParameters;
use nh4_rs::solver::FtcsSolver;
use nh4_rs::SolveError;

fn main() -> Result<(), SolveError> {
    let params = SoilParameters::default();

    println!("Solving {}x{} soil column ...", params.nt, params.nz);
    let result = FtcsSolver::new().solve(&params)?;

    println!("Completed {} time steps", result.len());
    for (key, value) in &result.metadata {
        println!("  {key}: {value}");
    }

    let config = CsvConfig {
        include_metadata: true,
        ..CsvConfig::default()
    };

    export_profile_csv(&result, result.len() - 1, "profile_final.csv", Some(&config))?;
    export_breakthrough_csv(
        &result,
        result.depths().len() - 1,
        "breakthrough_outlet.csv",
        Some(&config),
    )?;

    println!("Wrote profile_final.csv and breakthrough_outlet.csv");
    Ok(())
}
