use std::thread;
use std::time::{Duration, Instant, SystemTime};

/// Time source for countdown deadlines and tick pacing.
///
/// Deadlines are stored as `Instant`s produced by `now()`; the helpers below
/// saturate at zero so a passed deadline never yields a negative span.
pub trait Clock {
    fn now(&self) -> Instant;
    fn sleep(&self, d: Duration);

    /// Time left until `deadline`, zero once it has passed.
    fn until(&self, deadline: Instant) -> Duration {
        deadline.saturating_duration_since(self.now())
    }

    /// Time elapsed since `epoch`, zero if `epoch` lies in the future.
    fn since(&self, epoch: Instant) -> Duration {
        self.now().saturating_duration_since(epoch)
    }
}

/// Real-time monotonic clock backed by std::time::Instant.
///
/// On Linux `Instant` does not advance while the machine is suspended, so a
/// deadline measured with this clock drifts across a suspend. Use
/// [`WallClock`] for countdowns that must survive one.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}

/// Clock whose `now()` follows the system wall clock.
///
/// Instants are derived as `origin + (SystemTime::now() - origin_wall)`, so time
/// spent suspended is counted. A wall clock stepped backwards saturates at the
/// origin instead of going negative.
#[derive(Debug, Clone, Copy)]
pub struct WallClock {
    origin: Instant,
    origin_wall: SystemTime,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            origin_wall: SystemTime::now(),
        }
    }
}

impl Clock for WallClock {
    fn now(&self) -> Instant {
        let elapsed = SystemTime::now()
            .duration_since(self.origin_wall)
            .unwrap_or(Duration::ZERO);
        self.origin + elapsed
    }

    #[inline]
    fn sleep(&self, d: Duration) {
        if !d.is_zero() {
            thread::sleep(d);
        }
    }
}
