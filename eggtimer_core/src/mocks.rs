//! Test and helper mocks for eggtimer_core

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use eggtimer_traits::Notifier;
use eggtimer_traits::clock::Clock;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A notifier that accepts every call and does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn schedule_completion(&mut self, _after: Duration) -> Result<(), BoxError> {
        Ok(())
    }
    fn cancel_all_pending(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
    fn clear_badge_count(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
    fn request_permission(&mut self) -> Result<(), BoxError> {
        Ok(())
    }
}

/// One recorded notifier interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifierCall {
    Schedule(Duration),
    CancelAll,
    ClearBadge,
    RequestPermission,
}

/// Records every call. Optionally fails all of them after recording.
#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    calls: Vec<NotifierCall>,
    fail: bool,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A notifier whose every call errors (as if permission were denied).
    pub fn failing() -> Self {
        Self {
            calls: Vec::new(),
            fail: true,
        }
    }

    pub fn calls(&self) -> &[NotifierCall] {
        &self.calls
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Delays of every `Schedule` call, in order.
    pub fn scheduled(&self) -> Vec<Duration> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                NotifierCall::Schedule(d) => Some(*d),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, call: NotifierCall) -> Result<(), BoxError> {
        self.calls.push(call);
        if self.fail {
            Err(Box::new(std::io::Error::other("notification permission denied")))
        } else {
            Ok(())
        }
    }
}

impl Notifier for RecordingNotifier {
    fn schedule_completion(&mut self, after: Duration) -> Result<(), BoxError> {
        self.record(NotifierCall::Schedule(after))
    }
    fn cancel_all_pending(&mut self) -> Result<(), BoxError> {
        self.record(NotifierCall::CancelAll)
    }
    fn clear_badge_count(&mut self) -> Result<(), BoxError> {
        self.record(NotifierCall::ClearBadge)
    }
    fn request_permission(&mut self) -> Result<(), BoxError> {
        self.record(NotifierCall::RequestPermission)
    }
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone)]
pub struct ManualClock {
    base: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, d: Duration) {
        let mut off = self.offset.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *off += d;
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(Duration::from_secs(secs));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        let off = self.offset.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        self.base + *off
    }

    fn sleep(&self, d: Duration) {
        self.advance(d);
    }
}
