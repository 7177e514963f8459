//! Concrete adapters for the `eggtimer_traits` ports.
//!
//! - [`ThreadNotifier`]: one-shot completion alerts on background threads.
//! - [`ListBreedSource`]: random pick from an in-memory breed list.
pub mod error;

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::thread::JoinHandle;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crossbeam_channel as xch;
use eggtimer_traits::{Breed, BreedSource, Notifier};

use crate::error::GatewayError;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Receives the alert text when a scheduled completion fires.
pub type AlertSink = Arc<dyn Fn(&str) + Send + Sync>;

fn terminal_bell_sink() -> AlertSink {
    Arc::new(|msg: &str| {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "\x07{msg}");
        let _ = out.flush();
    })
}

struct Pending {
    // Dropping the sender cancels the alert.
    cancel_tx: xch::Sender<()>,
    handle: JoinHandle<()>,
}

/// Notifier that fires each scheduled completion from its own thread.
///
/// The thread waits on a cancel channel with `recv_timeout(after)`: a timeout
/// fires the alert, a disconnect means it was cancelled. Fired alerts bump the
/// badge count until [`Notifier::clear_badge_count`].
pub struct ThreadNotifier {
    message: String,
    enabled: bool,
    sink: AlertSink,
    badge: Arc<AtomicU32>,
    pending: Vec<Pending>,
}

impl ThreadNotifier {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            enabled: true,
            sink: terminal_bell_sink(),
            badge: Arc::new(AtomicU32::new(0)),
            pending: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_sink(mut self, sink: AlertSink) -> Self {
        self.sink = sink;
        self
    }

    /// A disabled notifier refuses permission and every schedule request.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn badge_count(&self) -> u32 {
        self.badge.load(Ordering::Relaxed)
    }

    /// Alerts scheduled and not yet fired or cancelled.
    pub fn pending_count(&mut self) -> usize {
        self.reap();
        self.pending.len()
    }

    fn reap(&mut self) {
        self.pending.retain(|p| !p.handle.is_finished());
    }

    fn cancel_pending(&mut self) -> usize {
        let n = self.pending.len();
        for p in self.pending.drain(..) {
            drop(p.cancel_tx);
            if p.handle.join().is_err() {
                tracing::warn!("alert thread panicked");
            }
        }
        n
    }
}

impl Notifier for ThreadNotifier {
    fn schedule_completion(&mut self, after: Duration) -> Result<(), BoxError> {
        if !self.enabled {
            return Err(Box::new(GatewayError::PermissionDenied));
        }
        self.reap();
        let (cancel_tx, cancel_rx) = xch::bounded::<()>(0);
        let sink = self.sink.clone();
        let badge = self.badge.clone();
        let message = self.message.clone();
        let handle = std::thread::Builder::new()
            .name("egg-alert".into())
            .spawn(move || match cancel_rx.recv_timeout(after) {
                Err(xch::RecvTimeoutError::Timeout) => {
                    badge.fetch_add(1, Ordering::Relaxed);
                    tracing::info!("completion alert fired");
                    sink(&message);
                }
                Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => {
                    tracing::trace!("completion alert cancelled");
                }
            })
            .map_err(GatewayError::from)?;
        self.pending.push(Pending { cancel_tx, handle });
        tracing::debug!(after_ms = after.as_millis() as u64, "completion alert scheduled");
        Ok(())
    }

    fn cancel_all_pending(&mut self) -> Result<(), BoxError> {
        let n = self.cancel_pending();
        if n > 0 {
            tracing::debug!(cancelled = n, "pending alerts cancelled");
        }
        Ok(())
    }

    fn clear_badge_count(&mut self) -> Result<(), BoxError> {
        self.badge.store(0, Ordering::Relaxed);
        Ok(())
    }

    fn request_permission(&mut self) -> Result<(), BoxError> {
        if self.enabled {
            Ok(())
        } else {
            Err(Box::new(GatewayError::PermissionDenied))
        }
    }
}

impl Drop for ThreadNotifier {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

/// Picks a random breed from a fixed list (e.g. loaded from a CSV catalog).
pub struct ListBreedSource {
    breeds: Vec<Breed>,
    state: AtomicU64,
}

impl ListBreedSource {
    /// Seeded from the system clock.
    pub fn new(breeds: Vec<Breed>) -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9E37_79B9_7F4A_7C15);
        Self::with_seed(breeds, seed)
    }

    pub fn with_seed(breeds: Vec<Breed>, seed: u64) -> Self {
        Self {
            breeds,
            state: AtomicU64::new(seed.max(1)),
        }
    }

    pub fn len(&self) -> usize {
        self.breeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.breeds.is_empty()
    }

    fn next_u64(&self) -> u64 {
        // xorshift64; zero is a fixed point so the seed is kept non-zero.
        let step = |mut x: u64| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        let prev = self
            .state
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |x| Some(step(x)))
            .unwrap_or_else(|x| x);
        step(prev)
    }
}

impl BreedSource for ListBreedSource {
    fn fetch_random(&self) -> Result<Option<Breed>, BoxError> {
        if self.breeds.is_empty() {
            return Ok(None);
        }
        let idx = (self.next_u64() % self.breeds.len() as u64) as usize;
        Ok(self.breeds.get(idx).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breed(name: &str) -> Breed {
        Breed {
            name: name.into(),
            origin: None,
            egg_color: None,
        }
    }

    #[test]
    fn empty_list_returns_none() {
        let src = ListBreedSource::with_seed(Vec::new(), 7);
        assert_eq!(src.fetch_random().unwrap(), None);
    }

    #[test]
    fn same_seed_same_sequence() {
        let list: Vec<Breed> = ["a", "b", "c", "d", "e"].iter().map(|n| breed(n)).collect();
        let a = ListBreedSource::with_seed(list.clone(), 42);
        let b = ListBreedSource::with_seed(list, 42);
        for _ in 0..20 {
            assert_eq!(a.fetch_random().unwrap(), b.fetch_random().unwrap());
        }
    }

    #[test]
    fn zero_seed_still_advances() {
        let src = ListBreedSource::with_seed(vec![breed("x"), breed("y")], 0);
        let n1 = src.next_u64();
        let n2 = src.next_u64();
        assert_ne!(n1, 0);
        assert_ne!(n1, n2);
    }
}
