//! Explicit-scheme stability control
//!
//! # Mathematical Background
//!
//! The FTCS scheme is conditionally stable. Two dimensionless numbers govern
//! the condition for an advection-diffusion equation on a uniform grid:
//!
//! ```text
//! courant   = v·dt/dz      (advection)   stable for courant ≤ 1
//! diffusion = D·dt/dz²     (diffusion)   stable for diffusion ≤ 1/2
//! ```
//!
//! When the requested grid violates either bound, the solver does not fail:
//! it shrinks the time step below both bounds (with a safety margin) and
//! grows the step count to cover the same duration. That correction happens
//! exactly once, before the stepping loop begins and is never revisited
//! mid-run, even if later dynamics would violate the bound again. The rate
//! limiters and the divergence abort in the integrator cover that residual
//! risk.

use nalgebra::DVector;

use crate::error::{SolveError, SolveResult};
use crate::solver::linspace;

/// Stability limit on the Courant number for the explicit scheme.
pub const COURANT_LIMIT: f64 = 1.0;

/// Stability limit on the diffusion number for the explicit scheme.
pub const DIFFUSION_LIMIT: f64 = 0.5;

/// Safety factor applied to the advective time-step bound when correcting.
const COURANT_SAFETY: f64 = 0.9;

/// Safety factor applied to the diffusive time-step bound when correcting.
const DIFFUSION_SAFETY: f64 = 0.4;

/// Hard cap on the corrected step count. Bounds the worst-case allocation
/// of the nt × nz result grids.
pub const MAX_TIME_STEPS: usize = 5000;

// =================================================================================================
// Stability Numbers
// =================================================================================================

/// The two dimensionless numbers governing explicit-scheme stability
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityNumbers {
    /// Advective displacement per step over grid spacing, v·dt/dz
    pub courant: f64,

    /// Diffusive spread per step over grid spacing squared, D·dt/dz²
    pub diffusion: f64,
}

impl StabilityNumbers {
    /// Evaluate both numbers for a grid with spacing `dz` and step `dt`.
    pub fn evaluate(d: f64, v: f64, dt: f64, dz: f64) -> Self {
        Self {
            courant: v * dt / dz,
            diffusion: d * dt / (dz * dz),
        }
    }

    /// True when both numbers respect their explicit-scheme bounds.
    pub fn is_stable(&self) -> bool {
        self.courant <= COURANT_LIMIT && self.diffusion <= DIFFUSION_LIMIT
    }

    /// Signal instability as an error value.
    ///
    /// The error is an internal protocol: the solver catches it and applies
    /// the one-time grid correction instead of surfacing it.
    pub fn check(&self) -> SolveResult<()> {
        if self.is_stable() {
            Ok(())
        } else {
            Err(SolveError::instability(self.courant, self.diffusion))
        }
    }
}

// =================================================================================================
// Time-Grid Correction
// =================================================================================================

/// Replacement time axis produced by the one-time stability correction
#[derive(Debug, Clone)]
pub(crate) struct TimeGridCorrection {
    pub t: DVector<f64>,
    pub dt: f64,
    pub nt: usize,
}

/// Largest time step the bounds admit for this grid, capped at the current
/// `dt`. Zero velocity or zero diffusion makes the corresponding bound
/// infinite.
fn max_stable_dt(d: f64, v: f64, dz: f64, dt: f64) -> f64 {
    let courant_bound = if v > 0.0 {
        COURANT_SAFETY * dz / v
    } else {
        f64::INFINITY
    };
    let diffusion_bound = if d > 0.0 {
        DIFFUSION_SAFETY * dz * dz / d
    } else {
        f64::INFINITY
    };

    courant_bound.min(diffusion_bound).min(dt)
}

/// Rebuild the time axis when the current step violates the bounds.
///
/// Returns `None` when the admissible step is not smaller than the current
/// one (nothing to correct). Otherwise the step count becomes
/// `min(ceil(t_max/dt') + 1, MAX_TIME_STEPS)` and `dt` is recomputed from
/// the rebuilt axis.
pub(crate) fn correct_time_grid(
    d: f64,
    v: f64,
    t_max: f64,
    dz: f64,
    dt: f64,
) -> Option<TimeGridCorrection> {
    let max_dt = max_stable_dt(d, v, dz, dt);
    if max_dt >= dt {
        return None;
    }

    let nt = (((t_max / max_dt).ceil() as usize) + 1).min(MAX_TIME_STEPS);
    let t = linspace(t_max, nt);
    let dt = t[1] - t[0];

    Some(TimeGridCorrection { t, dt, nt })
}

// =================================================================================================
// Tests
// =================================================================================================
