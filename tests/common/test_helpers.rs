//! Helper functions for integration tests

use nh4_rs::physics::SoilParameters;
use nh4_rs::solver::SimulationResult;

/// A parameter set small enough for fast test runs, otherwise defaults.
pub fn coarse_params() -> SoilParameters {
    SoilParameters {
        nz: 11,
        nt: 150,
        ..SoilParameters::default()
    }
}

/// Compute relative error: |actual - expected| / |expected|
pub fn relative_error(actual: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        (actual - expected).abs()
    } else {
        (actual - expected).abs() / expected.abs()
    }
}

/// Largest absolute element-wise difference between the grids of two runs.
pub fn max_abs_difference(a: &SimulationResult, b: &SimulationResult) -> f64 {
    assert_eq!(a.dissolved().shape(), b.dissolved().shape(), "shape mismatch");

    let dissolved = a
        .dissolved()
        .iter()
        .zip(b.dissolved().iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, f64::max);

    let adsorbed = a
        .adsorbed()
        .iter()
        .zip(b.adsorbed().iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0f64, f64::max);

    dissolved.max(adsorbed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_error() {
        assert!((relative_error(1.0, 1.0) - 0.0).abs() < 1e-10);
        assert!((relative_error(1.1, 1.0) - 0.1).abs() < 1e-10);
        assert!((relative_error(0.9, 1.0) - 0.1).abs() < 1e-10);
    }
}
