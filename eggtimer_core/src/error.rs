use thiserror::Error;

use crate::timer::TimerPhase;

#[derive(Debug, Error, Clone)]
pub enum EggTimerError {
    #[error("notification error: {0}")]
    Notification(String),
    #[error("notification permission denied")]
    PermissionDenied,
    #[error("storage error: {0}")]
    Storage(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("invalid parameters: {}", .0.join("; "))]
    Invalid(Vec<String>),
    #[error("invalid state: {0}")]
    State(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    #[error("cannot {event} while {phase}")]
    InvalidTransition {
        phase: TimerPhase,
        event: &'static str,
    },
    #[error("duration must be finite and >= 0")]
    InvalidDuration,
}

#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing notifier")]
    MissingNotifier,
    #[error("missing parameter store")]
    MissingStore,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

/// Unknown textual value for one of the parameter enums.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid {what} '{value}' (expected {expected})")]
pub struct ParseParamError {
    pub what: &'static str,
    pub value: String,
    pub expected: &'static str,
}

impl ParseParamError {
    pub fn new(what: &'static str, value: &str, expected: &'static str) -> Self {
        Self {
            what,
            value: value.to_string(),
            expected,
        }
    }
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
