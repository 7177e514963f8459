//! Boiling-time estimator.
//!
//! A heat-conduction model gives the primary cooking time. It is only trusted
//! inside its domain: when the inputs are physically nonsensical, when the log
//! argument is not positive, or when the result falls outside 1–20 minutes, an
//! empirical formula replaces it. The two empirical formulas intentionally use
//! different constants and temperature normalizations; keep them that way so
//! results stay reproducible across versions.
//!
//! Doneness monotonicity: on the sanity-fallback branch the time grows with
//! doneness (factor 0.7 < 1.0 < 1.4). On the primary branch it grows only while
//! `ratio >= 1`; below that the magnitude of a negative log shrinks as the
//! target rises. Switching branches between donenesses can also reorder times.

use std::f64::consts::PI;

use crate::params::{CookParameters, Doneness};

/// Boiling water temperature (°C).
pub const BOILING_WATER_C: f64 = 100.0;
/// Specific heat of egg (J/gK).
pub const SPECIFIC_HEAT: f64 = 3.7;
/// Egg density (g/cm³).
pub const DENSITY: f64 = 1.038;
/// Shape/conduction constant.
pub const CONDUCTION_K: f64 = 1.0;
/// Thermal diffusivity constant (cm²/s).
pub const THERMAL_DIFFUSIVITY: f64 = 0.0011;
/// Cooking time returned for physically nonsensical input (s).
pub const GUARD_FALLBACK_SECONDS: f64 = 180.0;
/// Plausible cooking window for the primary formula (s).
pub const MIN_PLAUSIBLE_SECONDS: f64 = 60.0;
pub const MAX_PLAUSIBLE_SECONDS: f64 = 1200.0;

/// Which formula produced the cooking time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EstimateBranch {
    /// Heat-conduction formula, inside the plausible window.
    Primary,
    /// Water not hotter than target or start temperature, or mass not positive.
    GuardFallback,
    /// Log argument not positive (fallback A).
    RatioFallback,
    /// Primary result outside the plausible window (fallback B).
    SanityFallback,
}

impl EstimateBranch {
    pub const fn as_str(self) -> &'static str {
        match self {
            EstimateBranch::Primary => "primary",
            EstimateBranch::GuardFallback => "guard_fallback",
            EstimateBranch::RatioFallback => "ratio_fallback",
            EstimateBranch::SanityFallback => "sanity_fallback",
        }
    }
}

/// Estimate breakdown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub total_seconds: f64,
    pub heatup_seconds: f64,
    pub cooking_seconds: f64,
    pub branch: EstimateBranch,
}

/// Recommended total duration in seconds (water heat-up + egg cooking).
pub fn estimate(params: &CookParameters) -> f64 {
    estimate_detailed(params).total_seconds
}

pub fn estimate_detailed(params: &CookParameters) -> Estimate {
    let heatup_seconds = params.water_start.heatup_seconds();
    let (cooking_seconds, branch) = egg_cooking_seconds(params);
    tracing::trace!(
        branch = branch.as_str(),
        cooking_seconds,
        heatup_seconds,
        "estimate"
    );
    Estimate {
        total_seconds: heatup_seconds + cooking_seconds,
        heatup_seconds,
        cooking_seconds,
        branch,
    }
}

/// Cooking time of the egg itself, without water heat-up.
pub fn egg_cooking_seconds(params: &CookParameters) -> (f64, EstimateBranch) {
    let tw = BOILING_WATER_C;
    let t0 = params.start_temperature_c();
    let ty = params.doneness.target_temperature_c();
    let m = params.mass_g;

    if !(tw > ty && tw > t0 && m > 0.0) {
        return (GUARD_FALLBACK_SECONDS, EstimateBranch::GuardFallback);
    }

    // Past the guard the ratio is always positive, so this branch has no caller
    // reachable through `CookParameters`; see the `fallback_a` unit tests.
    let denominator = ty - tw;
    let ratio = 0.76 * (t0 - tw) / denominator;
    if denominator == 0.0 || ratio <= 0.0 {
        return (
            fallback_a(m, t0, ty, params.doneness),
            EstimateBranch::RatioFallback,
        );
    }

    let ln_term = ratio.ln();
    let time = ((m.powf(2.0 / 3.0) * SPECIFIC_HEAT * DENSITY.powf(1.0 / 3.0))
        / (CONDUCTION_K * PI.powi(2) * THERMAL_DIFFUSIVITY)
        * ln_term)
        .abs();

    if !(MIN_PLAUSIBLE_SECONDS..=MAX_PLAUSIBLE_SECONDS).contains(&time) {
        return (
            fallback_b(m, t0, params.doneness),
            EstimateBranch::SanityFallback,
        );
    }
    (time, EstimateBranch::Primary)
}

/// Empirical formula used when the log argument is not positive.
pub(crate) fn fallback_a(mass_g: f64, t0: f64, ty: f64, doneness: Doneness) -> f64 {
    let factor = match doneness {
        Doneness::Soft => 0.8,
        Doneness::Medium => 1.0,
        Doneness::Hard => 1.3,
    };
    180.0 * (mass_g / 55.0).powf(0.67) * ((ty - t0) / (100.0 - t0)) * factor
}

/// Empirical formula used when the primary result is implausible.
pub(crate) fn fallback_b(mass_g: f64, t0: f64, doneness: Doneness) -> f64 {
    let factor = match doneness {
        Doneness::Soft => 0.7,
        Doneness::Medium => 1.0,
        Doneness::Hard => 1.4,
    };
    240.0 * (mass_g / 55.0).powf(0.67) * ((100.0 - t0) / (100.0 - 20.0)) * factor
}
