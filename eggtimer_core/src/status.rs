//! Timer status returned from every observation of the countdown.

use std::time::Duration;

/// Public status of the countdown after an event or observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    /// Not started, or reset/stopped; `remaining` is the committed duration.
    Idle { remaining: Duration },
    /// Counting down toward the stored deadline.
    Running { remaining: Duration },
    /// Frozen; `remaining` is the baseline used on resume.
    Paused { remaining: Duration },
    /// Deadline reached; completion alert is due.
    Completed,
}

impl TimerStatus {
    pub fn remaining(&self) -> Duration {
        match *self {
            TimerStatus::Idle { remaining }
            | TimerStatus::Running { remaining }
            | TimerStatus::Paused { remaining } => remaining,
            TimerStatus::Completed => Duration::ZERO,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TimerStatus::Completed)
    }
}
