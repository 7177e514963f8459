//! Runtime configuration types for the timer engine.
//!
//! These are the structs used by `CookTimer`, `CookSession` and the runner.
//! They are separate from the TOML-deserialized config in `eggtimer_config`.

use std::time::Duration;

/// Countdown evaluation settings.
#[derive(Debug, Clone)]
pub struct TimerCfg {
    /// Period of the recurring tick.
    pub tick: Duration,
    /// Tick gap above which the runner assumes the process was suspended and
    /// re-arms the completion notification.
    pub resume_gap: Duration,
}

impl Default for TimerCfg {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            resume_gap: Duration::from_millis(2500),
        }
    }
}

/// Mass bounds for the validator (inclusive).
#[derive(Debug, Clone)]
pub struct ValidationCfg {
    pub min_mass_g: f64,
    pub max_mass_g: f64,
}

impl Default for ValidationCfg {
    fn default() -> Self {
        Self {
            min_mass_g: 30.0,
            max_mass_g: 90.0,
        }
    }
}

/// Decorative breed lookup settings.
#[derive(Debug, Clone)]
pub struct BreedCfg {
    /// Max wait for the breed source before using the fallback list.
    pub timeout: Duration,
}

impl Default for BreedCfg {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }
}
