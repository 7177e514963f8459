//! Background tick source.
//!
//! Spawns a thread that emits the timer's [`TickRegistration`] every period
//! through a bounded channel. A slow consumer sees ticks coalesce rather than
//! queue up, which is fine because the timer derives everything from its
//! deadline.
//!
//! Each `Ticker` owns exactly one thread, shut down and joined on drop.
use crossbeam_channel as xch;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use crate::timer::TickRegistration;

pub struct Ticker {
    rx: xch::Receiver<TickRegistration>,
    registration: TickRegistration,
    emitted: Arc<AtomicU64>,
    shutdown: Arc<AtomicBool>,
    /// Dropping the sender wakes the thread out of its period wait.
    wake_tx: Option<xch::Sender<()>>,
    join_handle: Option<std::thread::JoinHandle<()>>,
}

impl Ticker {
    pub fn spawn(registration: TickRegistration, period: Duration) -> Self {
        let (tx, rx) = xch::bounded(1);
        let (wake_tx, wake_rx) = xch::bounded::<()>(0);
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        let emitted = Arc::new(AtomicU64::new(0));
        let emitted_clone = emitted.clone();
        let period = period.max(Duration::from_millis(1));

        let join_handle = std::thread::spawn(move || {
            loop {
                if shutdown_clone.load(Ordering::Relaxed) {
                    tracing::debug!("Ticker thread received shutdown signal");
                    break;
                }
                match wake_rx.recv_timeout(period) {
                    Err(xch::RecvTimeoutError::Timeout) => {}
                    // Owner dropped the wake sender, or sent explicitly.
                    Ok(()) | Err(xch::RecvTimeoutError::Disconnected) => break,
                }
                if shutdown_clone.load(Ordering::Relaxed) {
                    break;
                }
                match tx.try_send(registration) {
                    Ok(()) => {
                        emitted_clone.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(xch::TrySendError::Full(_)) => {}
                    Err(xch::TrySendError::Disconnected(_)) => {
                        tracing::debug!("Ticker consumer disconnected, exiting thread");
                        break;
                    }
                }
            }
            tracing::trace!(registration = registration.id(), "Ticker thread exiting cleanly");
        });

        Self {
            rx,
            registration,
            emitted,
            shutdown,
            wake_tx: Some(wake_tx),
            join_handle: Some(join_handle),
        }
    }

    pub fn registration(&self) -> TickRegistration {
        self.registration
    }

    /// Wait up to `timeout` for the next tick.
    pub fn recv_timeout(&self, timeout: Duration) -> Option<TickRegistration> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Ticks successfully handed to the channel so far.
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        drop(self.wake_tx.take());
        if let Some(handle) = self.join_handle.take() {
            match handle.join() {
                Ok(()) => {
                    tracing::trace!("Ticker thread joined successfully");
                }
                Err(e) => {
                    tracing::warn!(?e, "Ticker thread panicked during shutdown");
                }
            }
        }
    }
}
