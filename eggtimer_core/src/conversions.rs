//! `From`/`TryFrom` implementations bridging `eggtimer_config` types to core types.

use std::time::Duration;

use crate::config::{BreedCfg, TimerCfg, ValidationCfg};
use crate::error::ParseParamError;
use crate::params::CookParameters;

// ── TimerCfg ─────────────────────────────────────────────────────────────────

impl From<&eggtimer_config::TimerCfg> for TimerCfg {
    fn from(c: &eggtimer_config::TimerCfg) -> Self {
        Self {
            tick: Duration::from_millis(c.tick_ms.max(1)),
            resume_gap: Duration::from_millis(c.resume_gap_ms),
        }
    }
}

// ── ValidationCfg ────────────────────────────────────────────────────────────

impl From<&eggtimer_config::ValidationCfg> for ValidationCfg {
    fn from(c: &eggtimer_config::ValidationCfg) -> Self {
        Self {
            min_mass_g: c.min_mass_g,
            max_mass_g: c.max_mass_g,
        }
    }
}

// ── BreedCfg ─────────────────────────────────────────────────────────────────

impl From<&eggtimer_config::BreedsCfg> for BreedCfg {
    fn from(c: &eggtimer_config::BreedsCfg) -> Self {
        Self {
            timeout: Duration::from_millis(c.timeout_ms.max(1)),
        }
    }
}

// ── CookParameters ───────────────────────────────────────────────────────────

impl TryFrom<&eggtimer_config::DefaultsCfg> for CookParameters {
    type Error = ParseParamError;
    fn try_from(c: &eggtimer_config::DefaultsCfg) -> Result<Self, Self::Error> {
        let base = CookParameters::new(
            c.egg_class.parse()?,
            c.start_mode.parse()?,
            c.doneness.parse()?,
            c.water_start.parse()?,
        )
        .with_start_temperature(c.start_temperature_c);
        Ok(match c.mass_g {
            Some(m) => base.with_mass(m),
            None => base,
        })
    }
}
