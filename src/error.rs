//! Error types for the simulation core
//!
//! Three kinds of failure exist, with different reach:
//!
//! - [`SolveError::Configuration`]: the parameter set cannot support the
//!   finite-difference stencil or the grid arithmetic. Rejected before any
//!   allocation.
//! - [`SolveError::Instability`]: the explicit-scheme bounds are violated
//!   for the requested grid. Raised by the stability check and always caught
//!   inside the solver, which converts it into a one-time time-grid
//!   correction. It never escapes [`solve`](crate::solver::FtcsSolver::solve).
//! - [`SolveError::Divergence`]: a field value crossed the runaway
//!   threshold mid-run. Fatal; the solve aborts and no result is returned.
//!
//! Everything below these three (non-finite intermediates, kinetics
//! fail-safes) is absorbed locally by clamping or zeroing and never surfaces
//! as an error value.

use thiserror::Error;

/// Result alias used across the crate.
pub type SolveResult<T> = Result<T, SolveError>;

/// Simulation error enumeration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    /// The parameter set cannot be solved as given
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    /// Explicit-scheme stability bounds violated (internal signal)
    #[error(
        "explicit scheme unstable: courant = {courant:.4} (limit 1.0), \
         diffusion = {diffusion:.4} (limit 0.5)"
    )]
    Instability { courant: f64, diffusion: f64 },

    /// Runaway solution: a field value crossed the divergence threshold
    #[error(
        "solution diverged at step {step}: value {value:.4e} exceeds \
         limit {limit:.4e}; the run was aborted"
    )]
    Divergence { step: usize, value: f64, limit: f64 },
}

impl SolveError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn instability(courant: f64, diffusion: f64) -> Self {
        Self::Instability { courant, diffusion }
    }

    pub fn divergence(step: usize, value: f64, limit: f64) -> Self {
        Self::Divergence { step, value, limit }
    }

    /// True for the only error kind a caller of `solve` can observe
    /// besides configuration rejection.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Divergence { .. })
    }
}
