//! CSV export of simulation results
//!
//! Two views of a solved column are exported, matching what downstream
//! analysis usually wants:
//!
//! - **Depth profile**: both concentrations over depth at one time step
//! - **Breakthrough curve**: the dissolved concentration over time at one
//!   depth
//!
//! The format is plain CSV readable by Excel, pandas, and MATLAB, with an
//! optional `#`-commented metadata header carrying the entries of the
//! result's metadata map.
//!
//! # Example
//!
//! ```rust,ignore
//! use nh4_rs::output::export::export_profile_csv;
//!
//! // Final depth profile with default formatting
//! export_profile_csv(&result, result.len() - 1, "profile.csv", None)?;
//! ```
//!
//! **Output** (`profile.csv`):
//! ```csv
//! Depth (cm),Dissolved (mg/L),Adsorbed (mg/L)
//! 0.000000,20.000000,5.000000
//! 2.083333,19.425110,5.103240
//! ...
//! ```

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::{SolveError, SolveResult};
use crate::solver::SimulationResult;

// =================================================================================================
// Configuration
// =================================================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: column separator (default `,`)
/// - `precision`: number of decimal places (default 6)
/// - `include_metadata`: prepend `#`-commented lines with the result's
///   metadata entries (default false)
#[derive(Debug, Clone)]
pub struct CsvConfig {
    pub delimiter: char,
    pub precision: usize,
    pub include_metadata: bool,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            precision: 6,
            include_metadata: false,
        }
    }
}

// =================================================================================================
// Export Functions
// =================================================================================================

/// Export both concentration profiles at one time step.
///
/// Columns: depth, dissolved, adsorbed. Fails with a configuration error
/// when `step` is out of range or the selected data contains non-finite
/// values.
pub fn export_profile_csv<P: AsRef<Path>>(
    result: &SimulationResult,
    step: usize,
    path: P,
    config: Option<&CsvConfig>,
) -> SolveResult<()> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let dissolved = result
        .profile_at(step)
        .ok_or_else(|| SolveError::configuration(format!(
            "step {} out of range (result has {} steps)",
            step,
            result.len()
        )))?;
    let adsorbed = result
        .adsorbed_profile_at(step)
        .ok_or_else(|| SolveError::configuration("adsorbed profile out of range"))?;

    validate_series(dissolved.as_slice(), "dissolved profile")?;
    validate_series(adsorbed.as_slice(), "adsorbed profile")?;

    let mut file = open_output(&path)?;
    write_metadata_header(&mut file, result, config)?;

    let d = config.delimiter;
    writeln!(file, "Depth (cm){d}Dissolved (mg/L){d}Adsorbed (mg/L)")
        .map_err(|e| write_error(&path, e))?;

    for (i, depth) in result.depths().iter().enumerate() {
        writeln!(
            file,
            "{depth:.p$}{d}{c:.p$}{d}{a:.p$}",
            p = config.precision,
            c = dissolved[i],
            a = adsorbed[i],
        )
        .map_err(|e| write_error(&path, e))?;
    }

    Ok(())
}

/// Export the dissolved breakthrough curve at one depth index.
///
/// Columns: time, dissolved. Same validation rules as
/// [`export_profile_csv`].
pub fn export_breakthrough_csv<P: AsRef<Path>>(
    result: &SimulationResult,
    depth_index: usize,
    path: P,
    config: Option<&CsvConfig>,
) -> SolveResult<()> {
    let default_config = CsvConfig::default();
    let config = config.unwrap_or(&default_config);

    let curve = result
        .breakthrough_at(depth_index)
        .ok_or_else(|| SolveError::configuration(format!(
            "depth index {} out of range (result has {} depths)",
            depth_index,
            result.depths().len()
        )))?;

    validate_series(curve.as_slice(), "breakthrough curve")?;

    let mut file = open_output(&path)?;
    write_metadata_header(&mut file, result, config)?;

    let d = config.delimiter;
    writeln!(file, "Time (d){d}Dissolved (mg/L)").map_err(|e| write_error(&path, e))?;

    for (n, time) in result.times().iter().enumerate() {
        writeln!(
            file,
            "{time:.p$}{d}{c:.p$}",
            p = config.precision,
            c = curve[n],
        )
        .map_err(|e| write_error(&path, e))?;
    }

    Ok(())
}

// =================================================================================================
// Helpers
// =================================================================================================

fn validate_series(values: &[f64], what: &str) -> SolveResult<()> {
    if values.is_empty() {
        return Err(SolveError::configuration(format!("{what} is empty")));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(SolveError::configuration(format!(
            "{what} contains non-finite values"
        )));
    }
    Ok(())
}

fn open_output<P: AsRef<Path>>(path: P) -> SolveResult<File> {
    File::create(path.as_ref()).map_err(|e| {
        SolveError::configuration(format!(
            "cannot create {}: {}",
            path.as_ref().display(),
            e
        ))
    })
}

fn write_error<P: AsRef<Path>>(path: P, e: std::io::Error) -> SolveError {
    SolveError::configuration(format!("cannot write {}: {}", path.as_ref().display(), e))
}

fn write_metadata_header(
    file: &mut File,
    result: &SimulationResult,
    config: &CsvConfig,
) -> SolveResult<()> {
    if !config.include_metadata {
        return Ok(());
    }

    writeln!(file, "# Ammonium Soil-Column Simulation Data")
        .map_err(|e| SolveError::configuration(format!("cannot write header: {e}")))?;

    // Sorted for a reproducible header.
    let mut entries: Vec<_> = result.metadata.iter().collect();
    entries.sort();
    for (key, value) in entries {
        writeln!(file, "# {key}: {value}")
            .map_err(|e| SolveError::configuration(format!("cannot write header: {e}")))?;
    }
    writeln!(file, "#").map_err(|e| SolveError::configuration(format!("cannot write header: {e}")))?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
