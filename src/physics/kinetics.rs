//! Ammonium reaction kinetics
//!
//! Net and per-process reaction rates for one (dissolved, adsorbed) pair.
//! Three processes act on the dissolved phase:
//!
//! - **Adsorption/desorption**: reversible exchange with the solid phase,
//!   saturable in the dissolved concentration, first-order in release.
//! - **Nitrification**: first-order microbial oxidation to nitrate.
//! - **Plant uptake**: Michaelis–Menten root absorption.
//!
//! Both loss terms carry per-step caps so that one evaluation can never
//! consume more than a fixed fraction of the available substrate; the caps
//! keep the explicit integrator out of the stiff regime for the default
//! parameter ranges.
//!
//! The computation is pure: no state, no side effects, and no failure path.
//! A non-finite intermediate collapses all four rates to zero instead of
//! propagating.

use crate::physics::SoilParameters;

/// Fraction of the dissolved concentration nitrification may claim in one
/// evaluation.
pub const NITRIFICATION_STEP_CAP: f64 = 0.5;

/// Fraction of the dissolved concentration plant uptake may claim in one
/// evaluation.
pub const PLANT_UPTAKE_STEP_CAP: f64 = 0.3;

// =================================================================================================
// Reaction Components
// =================================================================================================

/// Reaction rates of one cell at one instant
///
/// `net` is the total sink removed from the dissolved phase:
/// `nitrification + plant_uptake − adsorption`. Adsorption enters with a
/// minus sign because that mass moves into the adsorbed phase, which is
/// accounted separately by the integrator.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ReactionComponents {
    /// Net sink on the dissolved phase
    pub net: f64,

    /// Exchange rate into the adsorbed phase (negative = desorption)
    pub adsorption: f64,

    /// First-order nitrification loss
    pub nitrification: f64,

    /// Michaelis–Menten plant-uptake loss
    pub plant_uptake: f64,
}

impl ReactionComponents {
    /// All four rates zero: the fail-safe value.
    pub fn zero() -> Self {
        Self::default()
    }

    /// True when every rate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.net.is_finite()
            && self.adsorption.is_finite()
            && self.nitrification.is_finite()
            && self.plant_uptake.is_finite()
    }
}

// =================================================================================================
// Reaction Kinetics Trait
// =================================================================================================

/// Trait for per-cell reaction-rate models
///
/// # Responsibility
///
/// Computes reaction rates for one (dissolved, adsorbed) concentration pair.
/// Does NOT integrate them; that is the solver's job. The kinetics provide
/// the chemistry, the solver the transport and time stepping.
///
/// # Contract
///
/// Implementations must be pure and total: same inputs give same outputs,
/// and every input (including garbage) yields finite rates or the all-zero
/// fail-safe. An implementation never panics for numeric reasons.
pub trait ReactionKinetics: Send + Sync {
    /// Reaction rates at the given dissolved and adsorbed concentrations.
    fn components(&self, c: f64, c_ads: f64) -> ReactionComponents;

    /// Name of the model (used for result metadata and logging)
    fn name(&self) -> &str;
}

// =================================================================================================
// Ammonium Kinetics
// =================================================================================================

/// The ammonium reaction network
///
/// Rate constants are captured once from a [`SoilParameters`] value, so a
/// kinetics instance stays consistent even if the caller mutates its
/// parameter set afterwards.
///
/// # Rate Laws
///
/// ```text
/// R_adsorb = k_a·(C_max − C_ads)·C/(C + 1) − k_d·C_ads     (below capacity)
///          = −k_d·C_ads                                     (at capacity)
/// R_nitr   = min(k_nitr·C, 0.5·C)
/// R_plant  = min(V_max·C/(K_m + C), 0.3·C)    for C > 0, else 0
/// R        = R_nitr + R_plant − R_adsorb
/// ```
///
/// Inputs are clamped before evaluation: C to ≥ 0, C_ads to \[0, C_max\].
#[derive(Debug, Clone, Copy)]
pub struct AmmoniumKinetics {
    k_a: f64,
    k_d: f64,
    c_max: f64,
    k_nitr: f64,
    v_max: f64,
    k_m: f64,
}

impl AmmoniumKinetics {
    /// Capture the rate constants of a parameter set.
    pub fn new(params: &SoilParameters) -> Self {
        Self {
            k_a: params.k_a,
            k_d: params.k_d,
            c_max: params.c_max,
            k_nitr: params.k_nitr,
            v_max: params.v_max,
            k_m: params.k_m,
        }
    }

    /// Adsorption capacity C_max of this model.
    pub fn capacity(&self) -> f64 {
        self.c_max
    }

    #[inline]
    fn adsorption_rate(&self, c: f64, c_ads: f64) -> f64 {
        if c_ads >= self.c_max {
            // Capacity exhausted: only desorption remains.
            -self.k_d * c_ads
        } else {
            self.k_a * (self.c_max - c_ads) * c / (c + 1.0) - self.k_d * c_ads
        }
    }

    #[inline]
    fn nitrification_rate(&self, c: f64) -> f64 {
        (self.k_nitr * c).min(NITRIFICATION_STEP_CAP * c)
    }

    #[inline]
    fn plant_uptake_rate(&self, c: f64) -> f64 {
        if c > 0.0 {
            (self.v_max * c / (self.k_m + c)).min(PLANT_UPTAKE_STEP_CAP * c)
        } else {
            0.0
        }
    }
}

impl ReactionKinetics for AmmoniumKinetics {
    fn components(&self, c: f64, c_ads: f64) -> ReactionComponents {
        let c = c.max(0.0);
        let c_ads = c_ads.min(self.c_max).max(0.0);

        let adsorption = self.adsorption_rate(c, c_ads);
        let nitrification = self.nitrification_rate(c);
        let plant_uptake = self.plant_uptake_rate(c);
        let net = nitrification + plant_uptake - adsorption;

        let components = ReactionComponents {
            net,
            adsorption,
            nitrification,
            plant_uptake,
        };

        if components.is_finite() {
            components
        } else {
            ReactionComponents::zero()
        }
    }

    fn name(&self) -> &str {
        "Ammonium adsorption-nitrification-uptake"
    }
}

// =================================================================================================
// Tests
// =================================================================================================
