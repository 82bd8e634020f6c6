//! Soil-column parameter set
//!
//! One flat, named structure covering the physical constants, the domain,
//! the grid resolution, and the initial conditions of a single simulation.
//! Validity beyond what the stencil needs is the caller's responsibility.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SolveError, SolveResult};

/// Parameters of one soil-column simulation
///
/// The structure is plain data: every field is public and the solver takes
/// it by shared reference, so a value is immutable for the duration of a
/// solve. [`Default`] carries the documented defaults; [`reset`](Self::reset)
/// restores them in place.
///
/// # Example
///
/// ```rust
/// use nh4_rs::physics::SoilParameters;
///
/// let mut params = SoilParameters::default();
/// params.v = 4.0;
/// params.reset();
/// assert_eq!(params.v, 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoilParameters {
    /// Effective diffusion/dispersion coefficient D \[cm²/d\]
    pub d: f64,

    /// Pore-water velocity v \[cm/d\]
    pub v: f64,

    /// Adsorption rate constant k_a \[1/d\]
    pub k_a: f64,

    /// Desorption rate constant k_d \[1/d\]
    pub k_d: f64,

    /// Adsorption capacity of the solid phase C_max \[mg/L\]
    pub c_max: f64,

    /// First-order nitrification rate k_nitr \[1/d\]
    pub k_nitr: f64,

    /// Maximum plant-uptake rate V_max \[mg/(L·d)\]
    pub v_max: f64,

    /// Uptake half-saturation constant K_m \[mg/L\]
    pub k_m: f64,

    /// Column depth z_max \[cm\]
    pub z_max: f64,

    /// Simulated duration t_max \[d\]
    pub t_max: f64,

    /// Number of spatial grid points
    pub nz: usize,

    /// Requested number of time steps (may be increased once by the
    /// stability correction, never decreased)
    pub nt: usize,

    /// Initial dissolved concentration, also the fixed inlet value \[mg/L\]
    pub c_initial: f64,

    /// Initial adsorbed concentration \[mg/L\]
    pub c_ads_initial: f64,
}

impl Default for SoilParameters {
    fn default() -> Self {
        Self {
            d: 5.0,
            v: 2.0,
            k_a: 0.05,
            k_d: 0.02,
            c_max: 50.0,
            k_nitr: 0.01,
            v_max: 2.0,
            k_m: 5.0,
            z_max: 50.0,
            t_max: 15.0,
            nz: 25,
            nt: 500,
            c_initial: 20.0,
            c_ads_initial: 5.0,
        }
    }
}

impl SoilParameters {
    /// Restore every field to its documented default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load parameters from a JSON file, falling back to defaults when the
    /// file is missing or unreadable.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded soil parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse soil parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Soil parameter file not found, using defaults");
                Self::default()
            }
        }
    }

    /// Validate that the set can be solved at all.
    ///
    /// Only the requirements of the three-point stencil and the grid
    /// arithmetic are enforced: nz ≥ 3, nt ≥ 2, positive extents, finite
    /// values. Physical plausibility (sign conventions, magnitudes) stays
    /// with the caller.
    pub fn validate(&self) -> SolveResult<()> {
        if self.nz < 3 {
            return Err(SolveError::configuration(format!(
                "nz = {} is too small for the central-difference stencil (minimum 3)",
                self.nz
            )));
        }
        if self.nt < 2 {
            return Err(SolveError::configuration(format!(
                "nt = {} cannot define a time step (minimum 2)",
                self.nt
            )));
        }
        if !(self.z_max > 0.0) {
            return Err(SolveError::configuration(format!(
                "z_max must be positive, got {}",
                self.z_max
            )));
        }
        if !(self.t_max > 0.0) {
            return Err(SolveError::configuration(format!(
                "t_max must be positive, got {}",
                self.t_max
            )));
        }

        let fields = [
            ("d", self.d),
            ("v", self.v),
            ("k_a", self.k_a),
            ("k_d", self.k_d),
            ("c_max", self.c_max),
            ("k_nitr", self.k_nitr),
            ("v_max", self.v_max),
            ("k_m", self.k_m),
            ("z_max", self.z_max),
            ("t_max", self.t_max),
            ("c_initial", self.c_initial),
            ("c_ads_initial", self.c_ads_initial),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(SolveError::configuration(format!(
                    "{} is not a finite number: {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Spatial grid spacing dz = z_max / (nz − 1).
    pub fn dz(&self) -> f64 {
        self.z_max / (self.nz as f64 - 1.0)
    }

    /// Time-step size dt = t_max / (nt − 1) before any stability correction.
    pub fn dt(&self) -> f64 {
        self.t_max / (self.nt as f64 - 1.0)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_documented_defaults() {
        let params = SoilParameters::default();
        assert_eq!(params.d, 5.0);
        assert_eq!(params.v, 2.0);
        assert_eq!(params.k_a, 0.05);
        assert_eq!(params.k_d, 0.02);
        assert_eq!(params.c_max, 50.0);
        assert_eq!(params.k_nitr, 0.01);
        assert_eq!(params.v_max, 2.0);
        assert_eq!(params.k_m, 5.0);
        assert_eq!(params.z_max, 50.0);
        assert_eq!(params.t_max, 15.0);
        assert_eq!(params.nz, 25);
        assert_eq!(params.nt, 500);
        assert_eq!(params.c_initial, 20.0);
        assert_eq!(params.c_ads_initial, 5.0);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut params = SoilParameters::default();
        params.d = 99.0;
        params.nz = 7;
        params.reset();
        assert_eq!(params, SoilParameters::default());
    }

    #[test]
    fn test_grid_spacing() {
        let params = SoilParameters::default();
        // dz = 50 / 24, dt = 15 / 499
        assert!((params.dz() - 50.0 / 24.0).abs() < 1e-12);
        assert!((params.dt() - 15.0 / 499.0).abs() < 1e-12);
    }

    #[test]
    fn test_validate_accepts_defaults() {
        assert!(SoilParameters::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_small_grid() {
        let mut params = SoilParameters::default();
        params.nz = 2;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("stencil"));
    }

    #[test]
    fn test_validate_rejects_single_time_point() {
        let mut params = SoilParameters::default();
        params.nt = 1;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_finite() {
        let mut params = SoilParameters::default();
        params.k_a = f64::NAN;
        let err = params.validate().unwrap_err();
        assert!(err.to_string().contains("k_a"));
    }

    #[test]
    fn test_validate_rejects_empty_domain() {
        let mut params = SoilParameters::default();
        params.z_max = 0.0;
        assert!(params.validate().is_err());

        let mut params = SoilParameters::default();
        params.t_max = -1.0;
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_serialization_round_trip() {
        let params = SoilParameters::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let parsed: SoilParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }
}
