//! Forward-time central-space integrator
//!
//! # Mathematical Background
//!
//! The dissolved phase obeys an advection-diffusion-reaction equation on a
//! uniform 1-D grid:
//!
//! ```text
//! ∂C/∂t = D·∂²C/∂z² − v·∂C/∂z − R(C, C_ads)
//! ```
//!
//! coupled to the adsorbed phase through the exchange rate:
//!
//! ```text
//! ∂C_ads/∂t = R_adsorb(C, C_ads)
//! ```
//!
//! Both are discretized explicitly: forward difference in time, central
//! differences in space, first order in dt and second order in dz.
//!
//! # Boundaries
//!
//! - Inlet (index 0): fixed at `c_initial` for the whole run.
//! - Outlet (last index): zero-gradient copy of the neighboring interior
//!   value after every step.
//!
//! # Numerical Safeguards
//!
//! The scheme carries three layers of protection, applied in this order:
//!
//! 1. **Corruption recovery**: a non-finite stored value is replaced by
//!    10% of the corresponding initial value before use.
//! 2. **Rate limiting**: the per-step relative change of each field is
//!    bounded (10% for the dissolved phase, 10% with an absolute floor of
//!    0.1 for the adsorbed phase), which keeps stiff reaction terms from
//!    overshooting the explicit step.
//! 3. **Divergence abort**: any value beyond 1000× the initial dissolved
//!    concentration ends the run with a fatal error; an explicit-scheme
//!    runaway is not retried.
//!
//! The limiter constants are numerical heuristics, not physically derived
//! quantities; they are kept as named constants for behavioral
//! compatibility with their established values.

use nalgebra::DMatrix;

use crate::error::{SolveError, SolveResult};
use crate::physics::{AmmoniumKinetics, ReactionComponents, ReactionKinetics, SoilParameters};
use crate::solver::linspace;
use crate::solver::result::SimulationResult;
use crate::solver::stability::{correct_time_grid, StabilityNumbers};

/// Largest relative change of the dissolved concentration one step may
/// apply, when the current value is positive.
const RELATIVE_RATE_LIMIT: f64 = 0.1;

/// Absolute floor on the admissible per-step change of the adsorbed phase,
/// so near-empty cells can still exchange mass.
const ADSORBED_CHANGE_FLOOR: f64 = 0.1;

/// Runaway threshold as a multiple of the initial dissolved concentration.
const DIVERGENCE_FACTOR: f64 = 1000.0;

/// Fraction of the initial values used to replace a corrupted cell.
const RECOVERY_FRACTION: f64 = 0.1;

// =================================================================================================
// FTCS Solver
// =================================================================================================

/// Explicit finite-difference solver for the coupled column equations
///
/// The solver is stateless: it can be reused for any number of solves, and
/// every solve exclusively owns its grids. Two solves from the same
/// parameter set produce identical results; the computation is
/// deterministic and single-threaded.
///
/// # Algorithm
///
/// 1. Validate the parameter set and build both coordinate axes.
/// 2. Check the stability numbers; on violation, shrink dt and grow the
///    step count once (see [`stability`](crate::solver::stability)).
/// 3. March the interior cells forward in time, applying the kinetics and
///    the safeguards cell by cell.
/// 4. Copy the outlet boundary and test for divergence after every step.
///
/// # Example
///
/// ```rust
/// use nh4_rs::physics::SoilParameters;
/// use nh4_rs::solver::FtcsSolver;
///
/// let solver = FtcsSolver::new();
/// let result = solver.solve(&SoilParameters::default()).unwrap();
/// assert_eq!(result.depths().len(), 25);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FtcsSolver;

impl FtcsSolver {
    /// Create a new FTCS solver.
    pub fn new() -> Self {
        Self
    }

    /// Name of the scheme (used in result metadata).
    pub fn name(&self) -> &'static str {
        "Forward-Time Central-Space"
    }

    /// Solve the column described by `params` with the ammonium kinetics.
    pub fn solve(&self, params: &SoilParameters) -> SolveResult<SimulationResult> {
        let kinetics = AmmoniumKinetics::new(params);
        self.solve_with(params, &kinetics)
    }

    /// Solve with a substituted reaction model.
    ///
    /// Transport, boundaries, and safeguards are unchanged; only the
    /// per-cell reaction rates come from `kinetics`.
    pub fn solve_with(
        &self,
        params: &SoilParameters,
        kinetics: &dyn ReactionKinetics,
    ) -> SolveResult<SimulationResult> {
        // ====== Step 1: Validation ======

        params.validate()?;

        let nz = params.nz;

        // ====== Step 2: Grid Setup ======

        let z = linspace(params.z_max, nz);
        let mut t = linspace(params.t_max, params.nt);

        let dz = z[1] - z[0];
        let mut dt = t[1] - t[0];
        let mut nt = params.nt;
        let mut corrected = false;

        // One-time stability correction. The instability signal is caught
        // here and never surfaces to the caller; it is not re-evaluated
        // mid-run.
        let numbers = StabilityNumbers::evaluate(params.d, params.v, dt, dz);
        if let Err(unstable) = numbers.check() {
            if let Some(correction) = correct_time_grid(params.d, params.v, params.t_max, dz, dt) {
                log::warn!(
                    "{}; shrinking dt {:.4e} -> {:.4e}, nt {} -> {}",
                    unstable,
                    dt,
                    correction.dt,
                    nt,
                    correction.nt
                );
                t = correction.t;
                dt = correction.dt;
                nt = correction.nt;
                corrected = true;
            }
        }

        log::debug!(
            "solving {} x {} grid with {} (dz = {:.4}, dt = {:.4e})",
            nt,
            nz,
            kinetics.name(),
            dz,
            dt
        );

        // ====== Step 3: Field Allocation ======

        let mut c = DMatrix::zeros(nt, nz);
        let mut c_ads = DMatrix::zeros(nt, nz);

        c.row_mut(0).fill(params.c_initial);
        c_ads.row_mut(0).fill(params.c_ads_initial);

        // The inlet is pinned for the whole run; the stepping loop never
        // touches column 0.
        c.column_mut(0).fill(params.c_initial);

        let divergence_limit = DIVERGENCE_FACTOR * params.c_initial;

        // ====== Step 4: Time Integration ======

        for n in 0..nt - 1 {
            for i in 1..nz - 1 {
                // Read the current cell, recovering from corruption.
                let mut c_curr = c[(n, i)].max(0.0);
                let mut c_ads_curr = c_ads[(n, i)].max(0.0);
                if !c_curr.is_finite() || !c_ads_curr.is_finite() {
                    c_curr = RECOVERY_FRACTION * params.c_initial;
                    c_ads_curr = RECOVERY_FRACTION * params.c_ads_initial;
                }

                // Reaction rates, with a defensive re-check on top of the
                // kinetics' own fail-safe.
                let mut rates = kinetics.components(c_curr, c_ads_curr);
                if !rates.is_finite() {
                    rates = ReactionComponents::zero();
                }

                // Central differences; non-finite results drop to zero.
                let mut d2c_dz2 = (c[(n, i + 1)] - 2.0 * c[(n, i)] + c[(n, i - 1)]) / (dz * dz);
                let mut dc_dz = (c[(n, i + 1)] - c[(n, i - 1)]) / (2.0 * dz);
                if !d2c_dz2.is_finite() {
                    d2c_dz2 = 0.0;
                }
                if !dc_dz.is_finite() {
                    dc_dz = 0.0;
                }

                let mut dc_dt = params.d * d2c_dz2 - params.v * dc_dz - rates.net;

                // Relative rate limiter on the dissolved phase.
                let max_change = RELATIVE_RATE_LIMIT * c_curr;
                if c_curr > 0.0 && (dc_dt * dt).abs() > max_change {
                    dc_dt = dc_dt.signum() * max_change / dt;
                }
                c[(n + 1, i)] = (c[(n, i)] + dt * dc_dt).max(0.0);

                // Adsorbed-phase update, rate-limited with an absolute
                // floor, then capped at capacity.
                let mut dc_ads_dt = rates.adsorption;
                let max_ads_change = (RELATIVE_RATE_LIMIT * c_ads_curr).max(ADSORBED_CHANGE_FLOOR);
                if (dc_ads_dt * dt).abs() > max_ads_change {
                    dc_ads_dt = dc_ads_dt.signum() * max_ads_change / dt;
                }
                c_ads[(n + 1, i)] = (c_ads[(n, i)] + dt * dc_ads_dt).max(0.0).min(params.c_max);
            }

            // Zero-gradient outflow at the bottom of the column.
            c[(n + 1, nz - 1)] = c[(n + 1, nz - 2)].max(0.0);
            c_ads[(n + 1, nz - 1)] = c_ads[(n + 1, nz - 2)].max(0.0);

            // ====== Divergence Check ======

            for i in 0..nz {
                let value = c[(n + 1, i)];
                if value > divergence_limit {
                    log::error!(
                        "runaway solution at step {}, depth index {}: {:.4e} > {:.4e}",
                        n + 1,
                        i,
                        value,
                        divergence_limit
                    );
                    return Err(SolveError::divergence(n + 1, value, divergence_limit));
                }
            }
        }

        // ====== Step 5: Build Result ======

        let mut result = SimulationResult::new(c, c_ads, z, t);

        result.add_metadata("solver", self.name());
        result.add_metadata("kinetics", kinetics.name());
        result.add_metadata("spatial points", &nz.to_string());
        result.add_metadata("time steps", &nt.to_string());
        result.add_metadata("dt", &dt.to_string());
        result.add_metadata("stability corrected", &corrected.to_string());

        Ok(result)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::stability::{COURANT_LIMIT, DIFFUSION_LIMIT, MAX_TIME_STEPS};

    // ====== Mock Kinetics for Testing ======

    /// No reactions at all: pure advection-diffusion transport.
    struct InertKinetics;

    impl ReactionKinetics for InertKinetics {
        fn components(&self, _c: f64, _c_ads: f64) -> ReactionComponents {
            ReactionComponents::zero()
        }

        fn name(&self) -> &str {
            "Inert"
        }
    }

    /// Always returns NaN rates, exercising the defensive fallback.
    struct CorruptKinetics;

    impl ReactionKinetics for CorruptKinetics {
        fn components(&self, _c: f64, _c_ads: f64) -> ReactionComponents {
            ReactionComponents {
                net: f64::NAN,
                adsorption: f64::NAN,
                nitrification: f64::NAN,
                plant_uptake: f64::NAN,
            }
        }

        fn name(&self) -> &str {
            "Corrupt"
        }
    }

    fn small_params() -> SoilParameters {
        SoilParameters {
            nz: 11,
            nt: 200,
            ..SoilParameters::default()
        }
    }

    // ====== Solver Creation Tests ======

    #[test]
    fn test_solver_creation() {
        let solver = FtcsSolver::new();
        assert_eq!(solver.name(), "Forward-Time Central-Space");
    }

    #[test]
    fn test_solver_default() {
        let solver = FtcsSolver::default();
        assert_eq!(solver.name(), "Forward-Time Central-Space");
    }

    // ====== Configuration Tests ======

    #[test]
    fn test_rejects_invalid_grid() {
        let mut params = SoilParameters::default();
        params.nz = 2;

        let result = FtcsSolver::new().solve(&params);
        assert!(matches!(result, Err(SolveError::Configuration { .. })));
    }

    // ====== Shape and Boundary Tests ======

    #[test]
    fn test_result_dimensions_without_correction() {
        let params = small_params();
        let result = FtcsSolver::new().solve(&params).unwrap();

        // The default grid is stable, so nt is untouched.
        assert_eq!(result.dissolved().shape(), (params.nt, params.nz));
        assert_eq!(result.adsorbed().shape(), (params.nt, params.nz));
        assert_eq!(result.depths().len(), params.nz);
        assert_eq!(result.times().len(), params.nt);
        assert_eq!(
            result.metadata.get("stability corrected"),
            Some(&"false".to_string())
        );
    }

    #[test]
    fn test_inlet_boundary_is_pinned() {
        let params = small_params();
        let result = FtcsSolver::new().solve(&params).unwrap();

        for n in 0..result.len() {
            assert_eq!(result.dissolved()[(n, 0)], params.c_initial);
        }
    }

    #[test]
    fn test_outlet_boundary_is_zero_gradient() {
        let params = small_params();
        let result = FtcsSolver::new().solve(&params).unwrap();

        let last = params.nz - 1;
        for n in 1..result.len() {
            assert_eq!(
                result.dissolved()[(n, last)],
                result.dissolved()[(n, last - 1)]
            );
            assert_eq!(
                result.adsorbed()[(n, last)],
                result.adsorbed()[(n, last - 1)]
            );
        }
    }

    #[test]
    fn test_fields_respect_physical_bounds() {
        let params = small_params();
        let result = FtcsSolver::new().solve(&params).unwrap();

        for value in result.dissolved().iter() {
            assert!(*value >= 0.0);
            assert!(value.is_finite());
        }
        for value in result.adsorbed().iter() {
            assert!(*value >= 0.0);
            assert!(*value <= params.c_max);
        }
    }

    // ====== Stability Correction Tests ======

    #[test]
    fn test_stability_correction_applied_once() {
        // dz = 12.5 and dt = 15 give courant = 12: wildly unstable.
        let params = SoilParameters {
            v: 10.0,
            d: 5.0,
            nz: 5,
            nt: 2,
            ..SoilParameters::default()
        };

        let result = FtcsSolver::new().solve(&params).unwrap();

        assert!(result.times().len() > params.nt);
        assert_eq!(
            result.metadata.get("stability corrected"),
            Some(&"true".to_string())
        );

        let dz = result.depths()[1] - result.depths()[0];
        let dt = result.times()[1] - result.times()[0];
        let numbers = StabilityNumbers::evaluate(params.d, params.v, dt, dz);
        assert!(numbers.courant <= COURANT_LIMIT);
        assert!(numbers.diffusion <= DIFFUSION_LIMIT);
    }

    #[test]
    fn test_corrected_step_count_is_capped() {
        // Extreme diffusion would ask for far more steps than the cap.
        let params = SoilParameters {
            d: 1.0e6,
            nz: 5,
            nt: 2,
            ..SoilParameters::default()
        };

        let result = FtcsSolver::new().solve(&params).unwrap();
        assert_eq!(result.times().len(), MAX_TIME_STEPS);
    }

    // ====== Substituted Kinetics Tests ======

    #[test]
    fn test_inert_kinetics_leave_adsorbed_phase_constant() {
        let params = small_params();
        let result = FtcsSolver::new()
            .solve_with(&params, &InertKinetics)
            .unwrap();

        // No exchange rate: interior adsorbed values never move.
        for n in 0..result.len() {
            for i in 1..params.nz - 1 {
                assert_eq!(result.adsorbed()[(n, i)], params.c_ads_initial);
            }
        }
    }

    #[test]
    fn test_corrupt_kinetics_fall_back_to_inert_transport() {
        let params = small_params();
        let corrupt = FtcsSolver::new()
            .solve_with(&params, &CorruptKinetics)
            .unwrap();
        let inert = FtcsSolver::new()
            .solve_with(&params, &InertKinetics)
            .unwrap();

        // NaN rates are zeroed, so the two runs are identical.
        assert_eq!(corrupt.dissolved(), inert.dissolved());
        assert_eq!(corrupt.adsorbed(), inert.adsorbed());
    }

    // ====== Uniform-State Test ======

    #[test]
    fn test_uniform_inert_column_stays_uniform() {
        // With no reactions and equal initial and inlet values, every
        // central difference is zero: the dissolved field must not move.
        let params = small_params();
        let result = FtcsSolver::new()
            .solve_with(&params, &InertKinetics)
            .unwrap();

        for value in result.dissolved().iter() {
            assert_eq!(*value, params.c_initial);
        }
    }

    // ====== Metadata Tests ======

    #[test]
    fn test_metadata_describes_the_run() {
        let params = small_params();
        let result = FtcsSolver::new().solve(&params).unwrap();

        assert_eq!(
            result.metadata.get("solver"),
            Some(&"Forward-Time Central-Space".to_string())
        );
        assert_eq!(result.metadata.get("spatial points"), Some(&"11".to_string()));
        assert_eq!(result.metadata.get("time steps"), Some(&"200".to_string()));

        let dt: f64 = result.metadata.get("dt").unwrap().parse().unwrap();
        assert!((dt - 15.0 / 199.0).abs() < 1e-12);
    }
}
