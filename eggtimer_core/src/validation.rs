//! Parameter validation.
//!
//! Each check appends at most one message; the parameters are valid iff no
//! message was produced. Validation never fails with an `Err`.

use crate::config::ValidationCfg;
use crate::params::CookParameters;

/// Outcome of [`validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.messages.is_empty()
    }
}

type Check = fn(&CookParameters, &ValidationCfg) -> Option<String>;

const CHECKS: &[Check] = &[check_mass];

fn check_mass(p: &CookParameters, cfg: &ValidationCfg) -> Option<String> {
    // NaN fails `contains`, which is what we want.
    if (cfg.min_mass_g..=cfg.max_mass_g).contains(&p.mass_g) {
        None
    } else {
        Some(format!(
            "Egg weight must be between {} and {} grams.",
            cfg.min_mass_g, cfg.max_mass_g
        ))
    }
}

/// Validate against the default bounds (30–90 g).
pub fn validate(params: &CookParameters) -> ValidationReport {
    validate_with(params, &ValidationCfg::default())
}

pub fn validate_with(params: &CookParameters, cfg: &ValidationCfg) -> ValidationReport {
    let messages: Vec<String> = CHECKS.iter().filter_map(|c| c(params, cfg)).collect();
    if !messages.is_empty() {
        tracing::debug!(count = messages.len(), "parameters rejected");
    }
    ValidationReport { messages }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_mentions_bounds() {
        let r = validate(&CookParameters::default().with_mass(91.0));
        assert_eq!(
            r.messages,
            vec!["Egg weight must be between 30 and 90 grams.".to_string()]
        );
    }

    #[test]
    fn custom_bounds_apply() {
        let cfg = ValidationCfg {
            min_mass_g: 40.0,
            max_mass_g: 50.0,
        };
        assert!(!validate_with(&CookParameters::default(), &cfg).is_valid());
        assert!(validate_with(&CookParameters::default().with_mass(45.0), &cfg).is_valid());
    }
}
