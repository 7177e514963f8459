//! Cooking parameter model.
//!
//! Every enum carries its fixed physical constant (default mass, target yolk
//! temperature, ambient temperature, water heat-up time). `CookParameters` is
//! an immutable value; the `with_*` methods return an updated copy.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseParamError;

/// Egg size class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EggClass {
    Small,
    Medium,
    Large,
}

impl EggClass {
    pub const ALL: [EggClass; 3] = [EggClass::Small, EggClass::Medium, EggClass::Large];

    /// Default mass in grams.
    pub const fn default_mass_g(self) -> f64 {
        match self {
            EggClass::Small => 45.0,
            EggClass::Medium => 55.0,
            EggClass::Large => 65.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            EggClass::Small => "small",
            EggClass::Medium => "medium",
            EggClass::Large => "large",
        }
    }
}

/// Target yolk firmness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Doneness {
    Soft,
    Medium,
    Hard,
}

impl Doneness {
    pub const ALL: [Doneness; 3] = [Doneness::Soft, Doneness::Medium, Doneness::Hard];

    /// Target core (yolk) temperature in °C.
    pub const fn target_temperature_c(self) -> f64 {
        match self {
            Doneness::Soft => 63.0,
            Doneness::Medium => 65.0,
            Doneness::Hard => 70.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Doneness::Soft => "soft",
            Doneness::Medium => "medium",
            Doneness::Hard => "hard",
        }
    }
}

/// Where the egg comes from before it goes into the water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartTemperatureMode {
    #[serde(alias = "fridge")]
    FromFridge,
    #[serde(alias = "room")]
    FromRoom,
}

impl StartTemperatureMode {
    /// Ambient temperature in °C used when no override is supplied.
    pub const fn default_temperature_c(self) -> f64 {
        match self {
            StartTemperatureMode::FromFridge => 4.0,
            StartTemperatureMode::FromRoom => 20.0,
        }
    }

    /// Lowest override accepted; lower values are floored to this.
    pub const fn min_override_c(self) -> f64 {
        match self {
            StartTemperatureMode::FromFridge => -10.0,
            StartTemperatureMode::FromRoom => 0.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            StartTemperatureMode::FromFridge => "fridge",
            StartTemperatureMode::FromRoom => "room",
        }
    }
}

/// Whether the egg goes into cold water or already-boiling water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterStartMode {
    Cold,
    Boiling,
}

impl WaterStartMode {
    /// Seconds attributed to bringing the water to the boil.
    pub const fn heatup_seconds(self) -> f64 {
        match self {
            WaterStartMode::Cold => 360.0,
            WaterStartMode::Boiling => 0.0,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            WaterStartMode::Cold => "cold",
            WaterStartMode::Boiling => "boiling",
        }
    }
}

/// Resolve the starting temperature in °C.
///
/// A finite override wins, floored at the mode's minimum. Non-finite overrides
/// are ignored. No upper bound is applied.
pub fn resolve_start_temperature(mode: StartTemperatureMode, override_c: Option<f64>) -> f64 {
    match override_c {
        Some(t) if t.is_finite() => t.max(mode.min_override_c()),
        _ => mode.default_temperature_c(),
    }
}

/// One cooking configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CookParameters {
    pub egg_class: EggClass,
    /// May lie outside the validator bounds; validity is checked separately.
    pub mass_g: f64,
    pub start_mode: StartTemperatureMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_temperature_override_c: Option<f64>,
    pub doneness: Doneness,
    pub water_start: WaterStartMode,
}

impl Default for CookParameters {
    fn default() -> Self {
        Self::new(
            EggClass::Medium,
            StartTemperatureMode::FromFridge,
            Doneness::Medium,
            WaterStartMode::Boiling,
        )
    }
}

impl CookParameters {
    /// Parameters with the class default mass and no temperature override.
    pub const fn new(
        egg_class: EggClass,
        start_mode: StartTemperatureMode,
        doneness: Doneness,
        water_start: WaterStartMode,
    ) -> Self {
        Self {
            egg_class,
            mass_g: egg_class.default_mass_g(),
            start_mode,
            start_temperature_override_c: None,
            doneness,
            water_start,
        }
    }

    /// Change the egg class; the mass follows the new class default.
    #[must_use]
    pub fn with_egg_class(self, egg_class: EggClass) -> Self {
        Self {
            egg_class,
            mass_g: egg_class.default_mass_g(),
            ..self
        }
    }

    #[must_use]
    pub fn with_mass(self, mass_g: f64) -> Self {
        Self { mass_g, ..self }
    }

    /// Change the start mode. An existing override is dropped since it was
    /// chosen against the previous mode's range.
    #[must_use]
    pub fn with_start_mode(self, start_mode: StartTemperatureMode) -> Self {
        Self {
            start_mode,
            start_temperature_override_c: None,
            ..self
        }
    }

    #[must_use]
    pub fn with_start_temperature(self, override_c: Option<f64>) -> Self {
        Self {
            start_temperature_override_c: override_c,
            ..self
        }
    }

    #[must_use]
    pub fn with_doneness(self, doneness: Doneness) -> Self {
        Self { doneness, ..self }
    }

    #[must_use]
    pub fn with_water_start(self, water_start: WaterStartMode) -> Self {
        Self {
            water_start,
            ..self
        }
    }

    /// Effective starting temperature in °C.
    pub fn start_temperature_c(&self) -> f64 {
        resolve_start_temperature(self.start_mode, self.start_temperature_override_c)
    }
}

// ── FromStr / Display ────────────────────────────────────────────────────────

impl FromStr for EggClass {
    type Err = ParseParamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" | "s" => Ok(EggClass::Small),
            "medium" | "m" => Ok(EggClass::Medium),
            "large" | "l" => Ok(EggClass::Large),
            _ => Err(ParseParamError::new("egg class", s, "small|medium|large")),
        }
    }
}

impl FromStr for Doneness {
    type Err = ParseParamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(Doneness::Soft),
            "medium" => Ok(Doneness::Medium),
            "hard" => Ok(Doneness::Hard),
            _ => Err(ParseParamError::new("doneness", s, "soft|medium|hard")),
        }
    }
}

impl FromStr for StartTemperatureMode {
    type Err = ParseParamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fridge" | "from_fridge" => Ok(StartTemperatureMode::FromFridge),
            "room" | "from_room" => Ok(StartTemperatureMode::FromRoom),
            _ => Err(ParseParamError::new("start mode", s, "fridge|room")),
        }
    }
}

impl FromStr for WaterStartMode {
    type Err = ParseParamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cold" => Ok(WaterStartMode::Cold),
            "boiling" | "hot" => Ok(WaterStartMode::Boiling),
            _ => Err(ParseParamError::new("water start", s, "cold|boiling")),
        }
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(EggClass, Doneness, StartTemperatureMode, WaterStartMode);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_defaults() {
        assert_eq!(EggClass::Small.default_mass_g(), 45.0);
        assert_eq!(EggClass::Medium.default_mass_g(), 55.0);
        assert_eq!(EggClass::Large.default_mass_g(), 65.0);
        assert_eq!(Doneness::Hard.target_temperature_c(), 70.0);
        assert_eq!(WaterStartMode::Cold.heatup_seconds(), 360.0);
    }

    #[test]
    fn resolve_prefers_finite_override() {
        use StartTemperatureMode::*;
        assert_eq!(resolve_start_temperature(FromFridge, None), 4.0);
        assert_eq!(resolve_start_temperature(FromRoom, None), 20.0);
        assert_eq!(resolve_start_temperature(FromRoom, Some(23.5)), 23.5);
        // No slider bounds: 45 °C "room" is accepted as-is.
        assert_eq!(resolve_start_temperature(FromRoom, Some(45.0)), 45.0);
        assert_eq!(resolve_start_temperature(FromFridge, Some(-40.0)), -10.0);
        assert_eq!(resolve_start_temperature(FromRoom, Some(-3.0)), 0.0);
        assert_eq!(resolve_start_temperature(FromFridge, Some(f64::NAN)), 4.0);
        assert_eq!(resolve_start_temperature(FromRoom, Some(f64::INFINITY)), 20.0);
    }

    #[test]
    fn updates_produce_new_values() {
        let base = CookParameters::default();
        let large = base.with_egg_class(EggClass::Large);
        assert_eq!(large.mass_g, 65.0);
        assert_eq!(base.mass_g, 55.0);

        let warm = base.with_start_temperature(Some(10.0));
        assert_eq!(warm.start_temperature_c(), 10.0);
        let room = warm.with_start_mode(StartTemperatureMode::FromRoom);
        assert_eq!(room.start_temperature_override_c, None);
        assert_eq!(room.start_temperature_c(), 20.0);

        assert_eq!(base, CookParameters::default());
        assert_ne!(base, base.with_mass(56.0));
    }

    #[test]
    fn parse_and_display_round_trip() {
        for c in EggClass::ALL {
            assert_eq!(c.to_string().parse::<EggClass>().unwrap(), c);
        }
        for d in Doneness::ALL {
            assert_eq!(d.to_string().parse::<Doneness>().unwrap(), d);
        }
        assert_eq!(
            "FROM_ROOM".parse::<StartTemperatureMode>().unwrap(),
            StartTemperatureMode::FromRoom
        );
        let err = "lukewarm".parse::<WaterStartMode>().unwrap_err();
        assert!(err.to_string().contains("cold|boiling"));
    }
}
