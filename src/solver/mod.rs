//! Numerical solution of the soil-column equations
//!
//! This module holds the HOW of the simulation:
//!
//! - [`stability`]: explicit-scheme stability numbers and the one-time
//!   time-grid correction
//! - [`ftcs`]: the forward-time central-space integrator
//! - [`result`]: the owned output value of a completed solve
//!
//! # The Architecture (WHAT vs HOW)
//!
//! The physics module defines parameters and reaction kinetics; the solver
//! consumes them through the
//! [`ReactionKinetics`](crate::physics::ReactionKinetics) seam. The same
//! kinetics model could be driven by a different scheme, and the integrator
//! can be exercised against mock kinetics in tests; neither side knows the
//! other's internals.
//!
//! # Quick Start
//!
//! ```rust
//! use nh4_rs::physics::SoilParameters;
//! use nh4_rs::solver::FtcsSolver;
//!
//! # fn main() -> Result<(), nh4_rs::SolveError> {
//! let params = SoilParameters::default();
//! let result = FtcsSolver::new().solve(&params)?;
//!
//! assert_eq!(result.dissolved().nrows(), result.times().len());
//! assert_eq!(result.dissolved().ncols(), result.depths().len());
//! # Ok(())
//! # }
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================

mod ftcs;
mod result;
pub mod stability;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use ftcs::FtcsSolver;
pub use result::SimulationResult;
pub use stability::StabilityNumbers;

// =================================================================================================
// Helper Functions
// =================================================================================================

use nalgebra::DVector;

/// Uniform coordinate axis from 0 to `end` with `n` points.
///
/// Each value is computed directly from its index rather than by
/// accumulating a step, so the last point is exactly `end` up to machine
/// epsilon regardless of `n`.
pub(crate) fn linspace(end: f64, n: usize) -> DVector<f64> {
    let last = (n - 1) as f64;
    DVector::from_fn(n, |i, _| end * (i as f64) / last)
}
