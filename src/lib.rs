//! nh4-rs: Ammonium Soil-Column Simulation
//!
//! Simulates transient transport and transformation of ammonium in a
//! one-dimensional soil column: advection, diffusion, reversible
//! adsorption/desorption, microbial nitrification, and plant uptake,
//! integrated with an explicit forward-time central-space (FTCS) scheme.
//!
//! # Architecture
//!
//! The crate is built on two core principles:
//!
//! 1. **Separation of Physics and Numerics**
//!    - [`physics`] defines parameters and reaction kinetics (what to solve)
//!    - [`solver`] provides the finite-difference scheme (how to solve)
//!
//! 2. **Configuration in, result out**
//!    - [`SoilParameters`](physics::SoilParameters) is immutable for the
//!      duration of a solve
//!    - [`SimulationResult`](solver::SimulationResult) is an owned value,
//!      independent of the configuration that produced it
//!
//! # Quick Start
//!
//! ```rust
//! use nh4_rs::physics::SoilParameters;
//! use nh4_rs::solver::FtcsSolver;
//!
//! # fn main() -> Result<(), nh4_rs::SolveError> {
//! // 1. Configure the column (documented defaults)
//! let params = SoilParameters::default();
//!
//! // 2. Run the simulation
//! let solver = FtcsSolver::new();
//! let result = solver.solve(&params)?;
//!
//! // 3. Access results
//! println!("Stored time steps: {}", result.len());
//! println!("Surface concentration: {}", result.dissolved()[(0, 0)]);
//! # Ok(())
//! # }
//! ```
//!
//! # Stability
//!
//! The explicit scheme is conditionally stable. Before stepping, the solver
//! evaluates the Courant and diffusion numbers for the requested grid and,
//! when either bound is violated, shrinks the time step and grows the step
//! count exactly once (see [`solver::stability`]). Runaway solutions abort
//! with [`SolveError::Divergence`].
//!
//! # Modules
//!
//! - [`physics`]: parameters and reaction kinetics (equations)
//! - [`solver`]: the FTCS integrator, stability control, results (methods)
//! - [`output`]: CSV export for downstream tools (optional, thin)

// Core modules
pub mod physics;

pub mod output;
pub mod solver;

mod error;

pub use error::{SolveError, SolveResult};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use nh4_rs::prelude::*;
    //! ```
    pub use crate::error::{SolveError, SolveResult};
    pub use crate::physics::{AmmoniumKinetics,
                             ReactionComponents,
                             ReactionKinetics,
                             SoilParameters};
    pub use crate::solver::{FtcsSolver,
                            SimulationResult,
                            StabilityNumbers};
}
