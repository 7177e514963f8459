#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Egg boiling-time estimation and countdown engine (platform-agnostic).
//!
//! Alerts and persistence go through ports: `eggtimer_traits::Notifier`,
//! `eggtimer_traits::BreedSource` and [`store::ParameterStore`].
//!
//! ## Architecture
//!
//! - **Parameters**: immutable cooking configuration (`params` module)
//! - **Estimator**: physics formula plus fallback ladder (`estimator` module)
//! - **Validation**: independent bound checks producing messages
//! - **Timer**: deadline-anchored state machine (`CookTimer`)
//! - **Session**: preview → commit → `last`/`favorite` slots (`CookSession`)
//! - **Runtime**: background `Ticker` and `runner::run_to_completion`
//!
//! Time is always derived from the stored deadline, never decremented per
//! tick, so missed ticks and suspension do not accumulate error.

pub mod breeds;
pub mod config;
pub mod conversions;
pub mod error;
pub mod estimator;
pub mod gateway_error;
pub mod mocks;
pub mod params;
pub mod runner;
pub mod session;
pub mod status;
pub mod store;
pub mod ticker;
pub mod timer;
pub mod util;
pub mod validation;

pub use config::{BreedCfg, TimerCfg, ValidationCfg};
pub use error::{BuildError, EggTimerError, ParseParamError, Report, Result, TimerError};
pub use estimator::{Estimate, EstimateBranch, estimate, estimate_detailed};
pub use params::{
    CookParameters, Doneness, EggClass, StartTemperatureMode, WaterStartMode,
    resolve_start_temperature,
};
pub use session::{Commit, CookSession, CookSessionBuilder, Preview};
pub use status::TimerStatus;
pub use store::{FileParameterStore, MemoryStore, ParameterStore, Slot, StoreError};
pub use timer::{CookTimer, TickRegistration, TimerPhase, TimerSnapshot};
pub use validation::{ValidationReport, validate, validate_with};
