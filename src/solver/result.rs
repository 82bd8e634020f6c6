//! Simulation result container
//!
//! The owned output of a completed solve: both concentration grids, both
//! coordinate axes, and a small metadata map describing how the solution was
//! produced. Downstream collaborators (export, plotting front-ends) read
//! these arrays; nothing here is written after the solve returns.

use nalgebra::{DMatrix, DVector};
use std::collections::HashMap;

/// Completed solution of one soil-column simulation
///
/// # Layout
///
/// Both grids are `nt × nz`: row = time step, column = depth index. The
/// axes have matching lengths (`times()` ↔ rows, `depths()` ↔ columns),
/// including any step-count growth applied by the stability correction.
///
/// # Example
///
/// ```rust
/// use nh4_rs::physics::SoilParameters;
/// use nh4_rs::solver::FtcsSolver;
///
/// # fn main() -> Result<(), nh4_rs::SolveError> {
/// let result = FtcsSolver::new().solve(&SoilParameters::default())?;
///
/// // Final depth profile and surface breakthrough curve
/// let final_profile = result.profile_at(result.len() - 1).unwrap();
/// let surface = result.breakthrough_at(0).unwrap();
/// assert_eq!(final_profile.len(), result.depths().len());
/// assert_eq!(surface.len(), result.times().len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Dissolved concentration grid C\[step, depth\]
    c: DMatrix<f64>,

    /// Adsorbed concentration grid C_ads\[step, depth\]
    c_ads: DMatrix<f64>,

    /// Depth coordinates \[cm\]
    z: DVector<f64>,

    /// Time coordinates \[d\], after any stability correction
    t: DVector<f64>,

    /// Descriptive metadata (solver name, step counts, dt, ...)
    pub metadata: HashMap<String, String>,
}

impl SimulationResult {
    /// Assemble a result from fully populated fields.
    pub fn new(c: DMatrix<f64>, c_ads: DMatrix<f64>, z: DVector<f64>, t: DVector<f64>) -> Self {
        debug_assert_eq!(c.nrows(), t.len());
        debug_assert_eq!(c.ncols(), z.len());
        debug_assert_eq!(c.shape(), c_ads.shape());

        Self {
            c,
            c_ads,
            z,
            t,
            metadata: HashMap::new(),
        }
    }

    /// Dissolved concentration grid, step × depth.
    pub fn dissolved(&self) -> &DMatrix<f64> {
        &self.c
    }

    /// Adsorbed concentration grid, step × depth.
    pub fn adsorbed(&self) -> &DMatrix<f64> {
        &self.c_ads
    }

    /// Depth coordinate axis.
    pub fn depths(&self) -> &DVector<f64> {
        &self.z
    }

    /// Time coordinate axis (reflects the corrected step count).
    pub fn times(&self) -> &DVector<f64> {
        &self.t
    }

    /// Number of stored time steps.
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// True when no time steps are stored. Never the case for a result
    /// returned by a successful solve.
    pub fn is_empty(&self) -> bool {
        self.t.len() == 0
    }

    /// Dissolved depth profile at one time step, or `None` out of range.
    pub fn profile_at(&self, step: usize) -> Option<DVector<f64>> {
        (step < self.c.nrows()).then(|| self.c.row(step).transpose())
    }

    /// Adsorbed depth profile at one time step, or `None` out of range.
    pub fn adsorbed_profile_at(&self, step: usize) -> Option<DVector<f64>> {
        (step < self.c_ads.nrows()).then(|| self.c_ads.row(step).transpose())
    }

    /// Dissolved time series at one depth index, or `None` out of range.
    pub fn breakthrough_at(&self, depth_index: usize) -> Option<DVector<f64>> {
        (depth_index < self.c.ncols()).then(|| self.c.column(depth_index).into_owned())
    }

    /// Attach a metadata entry.
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.insert(key.to_string(), value.to_string());
    }
}

// =================================================================================================
// Tests
// =================================================================================================
