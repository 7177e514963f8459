//! A cooking session: live preview of the current parameters, commit into the
//! timer, and the `last` / `favorite` slots.
//!
//! The session never watches its parameters; callers push every change
//! through [`CookSession::on_parameters_changed`] which revalidates and
//! re-estimates.

use std::sync::Arc;
use std::time::Duration;

use eggtimer_traits::Notifier;
use eggtimer_traits::clock::{Clock, MonotonicClock};
use eyre::WrapErr;

use crate::config::ValidationCfg;
use crate::error::{BuildError, EggTimerError, Result};
use crate::estimator::{Estimate, estimate_detailed};
use crate::params::CookParameters;
use crate::store::{ParameterStore, Slot};
use crate::timer::{CookTimer, TickRegistration};
use crate::validation::{ValidationReport, validate_with};

/// Result of the last recomputation. `estimate` is present only when valid.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub report: ValidationReport,
    pub estimate: Option<Estimate>,
}

/// What `commit` started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Commit {
    pub registration: TickRegistration,
    pub estimate: Estimate,
}

pub struct CookSession<N: Notifier, S: ParameterStore> {
    params: CookParameters,
    preview: Preview,
    validation: ValidationCfg,
    store: S,
    timer: CookTimer<N>,
}

impl<N: Notifier, S: ParameterStore> std::fmt::Debug for CookSession<N, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CookSession")
            .field("params", &self.params)
            .field("preview", &self.preview)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

fn compute_preview(params: &CookParameters, cfg: &ValidationCfg) -> Preview {
    let report = validate_with(params, cfg);
    let estimate = report.is_valid().then(|| estimate_detailed(params));
    Preview { report, estimate }
}

impl<N: Notifier, S: ParameterStore> CookSession<N, S> {
    pub fn builder() -> CookSessionBuilder<N, S> {
        CookSessionBuilder::default()
    }

    pub fn params(&self) -> &CookParameters {
        &self.params
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    pub fn timer(&self) -> &CookTimer<N> {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut CookTimer<N> {
        &mut self.timer
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Replace the parameters and recompute the preview.
    pub fn on_parameters_changed(&mut self, params: CookParameters) -> &Preview {
        self.params = params;
        self.preview = compute_preview(&self.params, &self.validation);
        if let Some(est) = &self.preview.estimate {
            tracing::debug!(
                total_s = est.total_seconds,
                branch = est.branch.as_str(),
                "preview updated"
            );
        }
        &self.preview
    }

    /// Apply one field change (`|p| p.with_doneness(..)`) and recompute.
    pub fn update(&mut self, f: impl FnOnce(CookParameters) -> CookParameters) -> &Preview {
        let next = f(self.params);
        self.on_parameters_changed(next)
    }

    /// Start the timer with the previewed duration and remember the parameters
    /// in the `last` slot. Invalid parameters are rejected with
    /// [`EggTimerError::Invalid`] and nothing is started.
    ///
    /// A failure to write `last` is logged; the timer keeps running.
    pub fn commit(&mut self) -> Result<Commit> {
        self.commit_with(None)
    }

    /// Like [`commit`](Self::commit) but counts down `duration` instead of the
    /// estimate when given. Validation still applies.
    pub fn commit_with(&mut self, duration: Option<Duration>) -> Result<Commit> {
        let Some(estimate) = self.preview.estimate else {
            return Err(eyre::Report::new(EggTimerError::Invalid(
                self.preview.report.messages.clone(),
            )));
        };
        let registration = match duration {
            Some(d) => self.timer.start(Some(d)),
            None => self.timer.start_secs(estimate.total_seconds),
        }
        .wrap_err("starting countdown")?;
        if let Err(e) = self.store.save(Slot::Last, &self.params) {
            tracing::warn!(error = %e, "saving last parameters failed");
        }
        Ok(Commit {
            registration,
            estimate,
        })
    }

    pub fn save_favorite(&mut self) -> Result<()> {
        self.store
            .save(Slot::Favorite, &self.params)
            .map_err(|e| eyre::Report::new(EggTimerError::Storage(e.to_string())))
            .wrap_err("saving favorite")
    }

    /// Load `slot` into the session. Returns `false` when the slot is empty,
    /// leaving the current parameters untouched.
    pub fn load(&mut self, slot: Slot) -> Result<bool> {
        let loaded = self
            .store
            .load(slot)
            .map_err(|e| eyre::Report::new(EggTimerError::Storage(e.to_string())))
            .wrap_err_with(|| format!("loading {slot} parameters"))?;
        match loaded {
            Some(p) => {
                self.on_parameters_changed(p);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── Builder ──────────────────────────────────────────────────────────────────

/// Builder for `CookSession`. Notifier and store are required.
pub struct CookSessionBuilder<N, S> {
    notifier: Option<N>,
    store: Option<S>,
    clock: Option<Arc<dyn Clock + Send + Sync>>,
    validation: Option<ValidationCfg>,
    params: Option<CookParameters>,
}

impl<N, S> Default for CookSessionBuilder<N, S> {
    fn default() -> Self {
        Self {
            notifier: None,
            store: None,
            clock: None,
            validation: None,
            params: None,
        }
    }
}

impl<N: Notifier, S: ParameterStore> CookSessionBuilder<N, S> {
    pub fn with_notifier(mut self, notifier: N) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn with_store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_validation(mut self, cfg: ValidationCfg) -> Self {
        self.validation = Some(cfg);
        self
    }

    pub fn with_params(mut self, params: CookParameters) -> Self {
        self.params = Some(params);
        self
    }

    pub fn build(self) -> Result<CookSession<N, S>> {
        let notifier = self
            .notifier
            .ok_or_else(|| eyre::Report::new(BuildError::MissingNotifier))?;
        let store = self
            .store
            .ok_or_else(|| eyre::Report::new(BuildError::MissingStore))?;
        let validation = self.validation.unwrap_or_default();
        if !validation.min_mass_g.is_finite() || !validation.max_mass_g.is_finite() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "mass bounds must be finite",
            )));
        }
        if validation.min_mass_g >= validation.max_mass_g {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "min_mass_g must be < max_mass_g",
            )));
        }
        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(MonotonicClock::new()));
        let params = self.params.unwrap_or_default();
        let preview = compute_preview(&params, &validation);
        Ok(CookSession {
            params,
            preview,
            validation,
            store,
            timer: CookTimer::with_clock(notifier, clock),
        })
    }
}
