//! Deadline-anchored countdown (`CookTimer`).
//!
//! The timer stores an absolute deadline while running and derives the
//! remaining time from it on every observation, so missed or delayed ticks and
//! process suspension never cause drift. Ticks carry a [`TickRegistration`];
//! only the registration handed out by the latest `start` is honored, so a
//! late callback from a paused or stopped run cannot change state.
//!
//! Notifier failures are logged and ignored: the countdown stays authoritative.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eggtimer_traits::Notifier;
use eggtimer_traits::clock::{Clock, MonotonicClock};

use crate::error::TimerError;
use crate::gateway_error::map_gateway_error;
use crate::status::TimerStatus;
use crate::util::seconds_to_duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerPhase {
    Idle,
    Running,
    Paused,
    Completed,
}

impl TimerPhase {
    pub const fn as_str(self) -> &'static str {
        match self {
            TimerPhase::Idle => "idle",
            TimerPhase::Running => "running",
            TimerPhase::Paused => "paused",
            TimerPhase::Completed => "completed",
        }
    }
}

impl fmt::Display for TimerPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token identifying the active tick subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickRegistration(u64);

impl TickRegistration {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Point-in-time view of the timer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerSnapshot {
    pub phase: TimerPhase,
    pub committed: Duration,
    pub remaining: Duration,
    /// Present only while running.
    pub deadline: Option<Instant>,
}

pub struct CookTimer<N: Notifier> {
    notifier: N,
    clock: Arc<dyn Clock + Send + Sync>,
    phase: TimerPhase,
    committed: Duration,
    // Baseline while not running; ignored while a deadline is set.
    remaining: Duration,
    deadline: Option<Instant>,
    next_registration: u64,
    active_tick: Option<TickRegistration>,
    notifier_failures: u32,
}

impl<N: Notifier> fmt::Debug for CookTimer<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookTimer")
            .field("phase", &self.phase)
            .field("committed_s", &self.committed.as_secs_f64())
            .field("remaining_s", &self.remaining().as_secs_f64())
            .field("active_tick", &self.active_tick)
            .finish()
    }
}

impl<N: Notifier> CookTimer<N> {
    /// Idle timer with a zero committed duration on the real monotonic clock.
    pub fn new(notifier: N) -> Self {
        Self::with_clock(notifier, Arc::new(MonotonicClock::new()))
    }

    pub fn with_clock(notifier: N, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            notifier,
            clock,
            phase: TimerPhase::Idle,
            committed: Duration::ZERO,
            remaining: Duration::ZERO,
            deadline: None,
            next_registration: 0,
            active_tick: None,
            notifier_failures: 0,
        }
    }

    pub fn phase(&self) -> TimerPhase {
        self.phase
    }

    pub fn committed(&self) -> Duration {
        self.committed
    }

    /// Remaining time derived from the deadline while running. Pure read: the
    /// running → completed transition happens in [`status`](Self::status),
    /// [`on_tick`](Self::on_tick) and [`on_foreground`](Self::on_foreground).
    pub fn remaining(&self) -> Duration {
        match self.deadline {
            Some(deadline) => self.clock.until(deadline),
            None => self.remaining,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            phase: self.phase,
            committed: self.committed,
            remaining: self.remaining(),
            deadline: self.deadline,
        }
    }

    pub fn active_registration(&self) -> Option<TickRegistration> {
        self.active_tick
    }

    pub fn clock(&self) -> &Arc<dyn Clock + Send + Sync> {
        &self.clock
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Number of notifier calls that failed since construction.
    pub fn notifier_failures(&self) -> u32 {
        self.notifier_failures
    }

    /// Start or resume the countdown.
    ///
    /// - `Some(d)` commits `d` as the new duration and counts down from it.
    /// - `None` resumes from the paused remaining time, counts down the
    ///   committed duration from idle, or restarts it after completion.
    ///
    /// Returns the registration the tick source must present.
    pub fn start(&mut self, duration: Option<Duration>) -> Result<TickRegistration, TimerError> {
        if self.phase == TimerPhase::Running {
            return Err(TimerError::InvalidTransition {
                phase: self.phase,
                event: "start",
            });
        }
        let remaining = match (duration, self.phase) {
            (Some(d), _) => d,
            (None, TimerPhase::Completed) => self.committed,
            (None, _) => self.remaining,
        };
        let now = self.clock.now();
        let deadline = now
            .checked_add(remaining)
            .ok_or(TimerError::InvalidDuration)?;

        if let Some(d) = duration {
            self.committed = d;
        }
        let resumed = self.phase == TimerPhase::Paused && duration.is_none();
        self.remaining = remaining;
        self.deadline = Some(deadline);
        self.phase = TimerPhase::Running;
        let registration = self.register_tick();

        self.cancel_notifications();
        self.schedule_notification(remaining);
        tracing::info!(
            remaining_s = remaining.as_secs_f64(),
            committed_s = self.committed.as_secs_f64(),
            resumed,
            registration = registration.id(),
            "timer started"
        );
        Ok(registration)
    }

    /// `start` with a duration in seconds, as produced by the estimator.
    pub fn start_secs(&mut self, seconds: f64) -> Result<TickRegistration, TimerError> {
        let d = seconds_to_duration(seconds).ok_or(TimerError::InvalidDuration)?;
        self.start(Some(d))
    }

    /// Freeze the countdown, keeping the remaining time as the resume baseline.
    ///
    /// A countdown whose deadline already passed completes instead and keeps
    /// its scheduled alert.
    pub fn pause(&mut self) -> Result<TimerStatus, TimerError> {
        if self.phase != TimerPhase::Running {
            return Err(TimerError::InvalidTransition {
                phase: self.phase,
                event: "pause",
            });
        }
        if let TimerStatus::Completed = self.evaluate() {
            return Ok(TimerStatus::Completed);
        }
        self.remaining = self.remaining();
        self.deadline = None;
        self.active_tick = None;
        self.phase = TimerPhase::Paused;
        self.cancel_notifications();
        tracing::debug!(remaining_s = self.remaining.as_secs_f64(), "timer paused");
        Ok(self.status_now())
    }

    /// Return to idle with the committed duration restored. Valid from any phase.
    pub fn reset(&mut self) -> TimerStatus {
        let active = matches!(self.phase, TimerPhase::Running | TimerPhase::Paused);
        self.return_to_idle(active)
    }

    /// Reset, cancel any alert still pending whatever the phase, and clear
    /// the delivered completion badge.
    pub fn stop(&mut self) -> TimerStatus {
        let status = self.return_to_idle(true);
        if let Err(e) = self.notifier.clear_badge_count() {
            self.notifier_failures = self.notifier_failures.saturating_add(1);
            let mapped = map_gateway_error(&*e);
            tracing::warn!(error = %mapped, "clear_badge_count failed");
        }
        tracing::info!("timer stopped");
        status
    }

    /// Periodic evaluation. Ticks from a registration other than the active one
    /// are ignored and leave the state untouched.
    pub fn on_tick(&mut self, registration: TickRegistration) -> TimerStatus {
        if self.active_tick != Some(registration) {
            tracing::trace!(
                registration = registration.id(),
                phase = %self.phase,
                "ignoring stale tick"
            );
            return self.status_now();
        }
        self.evaluate()
    }

    /// Process resumed / came back to the foreground. While running, the
    /// remaining time is recomputed from the deadline and the completion
    /// notification is cancelled and rescheduled for what is left.
    pub fn on_foreground(&mut self) -> TimerStatus {
        if self.phase != TimerPhase::Running {
            return self.status_now();
        }
        let status = self.evaluate();
        if let TimerStatus::Running { remaining } = status {
            self.cancel_notifications();
            self.schedule_notification(remaining);
            tracing::debug!(remaining_s = remaining.as_secs_f64(), "completion re-armed");
        }
        status
    }

    /// Observe the timer, completing it if the deadline has passed.
    pub fn status(&mut self) -> TimerStatus {
        if self.phase == TimerPhase::Running {
            self.evaluate()
        } else {
            self.status_now()
        }
    }

    /// Ask the notifier for permission to deliver alerts.
    pub fn request_permission(&mut self) -> Result<(), crate::error::EggTimerError> {
        self.notifier
            .request_permission()
            .map_err(|e| map_gateway_error(&*e))
    }

    // ── Private ──────────────────────────────────────────────────────────────

    fn return_to_idle(&mut self, cancel: bool) -> TimerStatus {
        let was = self.phase;
        self.remaining = self.committed;
        self.deadline = None;
        self.active_tick = None;
        self.phase = TimerPhase::Idle;
        if cancel {
            self.cancel_notifications();
        }
        tracing::debug!(from = %was, committed_s = self.committed.as_secs_f64(), "timer reset");
        self.status_now()
    }

    fn evaluate(&mut self) -> TimerStatus {
        let remaining = self.remaining();
        tracing::trace!(remaining_ms = remaining.as_millis() as u64, "tick");
        if remaining.is_zero() {
            self.complete();
            return TimerStatus::Completed;
        }
        TimerStatus::Running { remaining }
    }

    fn complete(&mut self) {
        self.remaining = Duration::ZERO;
        self.deadline = None;
        self.active_tick = None;
        self.phase = TimerPhase::Completed;
        tracing::info!(committed_s = self.committed.as_secs_f64(), "timer completed");
    }

    fn status_now(&self) -> TimerStatus {
        let remaining = self.remaining();
        match self.phase {
            TimerPhase::Idle => TimerStatus::Idle { remaining },
            TimerPhase::Running => TimerStatus::Running { remaining },
            TimerPhase::Paused => TimerStatus::Paused { remaining },
            TimerPhase::Completed => TimerStatus::Completed,
        }
    }

    fn register_tick(&mut self) -> TickRegistration {
        self.next_registration = self.next_registration.wrapping_add(1);
        let registration = TickRegistration(self.next_registration);
        self.active_tick = Some(registration);
        registration
    }

    fn schedule_notification(&mut self, after: Duration) {
        if let Err(e) = self.notifier.schedule_completion(after) {
            self.notifier_failures = self.notifier_failures.saturating_add(1);
            let mapped = map_gateway_error(&*e);
            tracing::warn!(error = %mapped, "schedule_completion failed; countdown continues");
        }
    }

    fn cancel_notifications(&mut self) {
        if let Err(e) = self.notifier.cancel_all_pending() {
            self.notifier_failures = self.notifier_failures.saturating_add(1);
            let mapped = map_gateway_error(&*e);
            tracing::warn!(error = %mapped, "cancel_all_pending failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{ManualClock, NoopNotifier};

    fn timer() -> (CookTimer<NoopNotifier>, ManualClock) {
        let clock = ManualClock::new();
        let t = CookTimer::with_clock(NoopNotifier, Arc::new(clock.clone()));
        (t, clock)
    }

    #[test]
    fn created_idle_with_zero_duration() {
        let (t, _) = timer();
        let s = t.snapshot();
        assert_eq!(s.phase, TimerPhase::Idle);
        assert_eq!(s.committed, Duration::ZERO);
        assert_eq!(s.remaining, Duration::ZERO);
        assert_eq!(s.deadline, None);
    }

    #[test]
    fn registrations_are_unique_per_start() {
        let (mut t, _) = timer();
        let a = t.start(Some(Duration::from_secs(5))).unwrap();
        t.pause().unwrap();
        let b = t.start(None).unwrap();
        assert_ne!(a, b);
        assert_eq!(t.active_registration(), Some(b));
    }

    #[test]
    fn start_secs_rejects_bad_durations() {
        let (mut t, _) = timer();
        assert_eq!(t.start_secs(f64::NAN), Err(TimerError::InvalidDuration));
        assert_eq!(t.start_secs(-1.0), Err(TimerError::InvalidDuration));
        assert_eq!(t.phase(), TimerPhase::Idle);
    }

    #[test]
    fn transition_error_names_phase_and_event() {
        let (mut t, _) = timer();
        let err = t.pause().unwrap_err();
        assert_eq!(err.to_string(), "cannot pause while idle");
    }
}
