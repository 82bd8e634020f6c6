//! Physical description of the soil column
//!
//! This module holds the WHAT of the simulation:
//!
//! - [`SoilParameters`]: physical and numerical configuration of one column
//! - [`ReactionKinetics`]: trait for per-cell reaction-rate models
//! - [`AmmoniumKinetics`]: the ammonium reaction network
//!   (adsorption/desorption, nitrification, plant uptake)
//!
//! The solver module consumes these through the [`ReactionKinetics`] seam:
//! kinetics are responsible for the chemistry, the solver for transport and
//! time integration.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod kinetics;
pub mod parameters;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use kinetics::{AmmoniumKinetics, ReactionComponents, ReactionKinetics};
pub use parameters::SoilParameters;
