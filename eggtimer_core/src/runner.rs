//! Drive a running [`CookTimer`] to completion from a background [`Ticker`].
//!
//! The loop tolerates late and coalesced ticks. A gap between two ticks longer
//! than `TimerCfg::resume_gap` is treated as the process having been suspended:
//! the timer gets an `on_foreground` instead of a plain tick, which re-arms the
//! completion notification for what is left.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use eggtimer_traits::Notifier;

use crate::config::TimerCfg;
use crate::error::{EggTimerError, Result as CoreResult};
use crate::status::TimerStatus;
use crate::ticker::Ticker;
use crate::timer::CookTimer;

/// Upper bound on how long the loop waits before rechecking the shutdown flag.
const SHUTDOWN_POLL: Duration = Duration::from_millis(100);

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    /// The shutdown flag was raised; the timer has been stopped.
    Interrupted,
    /// Something else moved the timer out of `Running` (paused or reset).
    Left(crate::timer::TimerPhase),
}

/// Block until the timer completes or `shutdown` is raised.
///
/// `on_progress` sees every status produced by a tick, including the final one.
pub fn run_to_completion<N, F>(
    timer: &mut CookTimer<N>,
    cfg: &TimerCfg,
    shutdown: &AtomicBool,
    mut on_progress: F,
) -> CoreResult<RunOutcome>
where
    N: Notifier,
    F: FnMut(&TimerStatus),
{
    let registration = timer.active_registration().ok_or_else(|| {
        eyre::Report::new(EggTimerError::State(format!(
            "timer must be running, is {}",
            timer.phase()
        )))
    })?;

    let ticker = Ticker::spawn(registration, cfg.tick);
    let poll = cfg.tick.min(SHUTDOWN_POLL);
    let mut last_tick_at = timer.clock().now();

    loop {
        if shutdown.load(Ordering::Relaxed) {
            tracing::info!(
                remaining_s = timer.remaining().as_secs_f64(),
                "interrupted; stopping timer"
            );
            timer.stop();
            return Ok(RunOutcome::Interrupted);
        }

        let Some(reg) = ticker.recv_timeout(poll) else {
            continue;
        };

        let gap = timer.clock().since(last_tick_at);
        last_tick_at = timer.clock().now();

        let status = if gap > cfg.resume_gap {
            tracing::info!(gap_ms = gap.as_millis() as u64, "tick gap detected; resyncing");
            timer.on_foreground()
        } else {
            timer.on_tick(reg)
        };
        on_progress(&status);

        match status {
            TimerStatus::Completed => return Ok(RunOutcome::Completed),
            TimerStatus::Running { .. } => {}
            TimerStatus::Idle { .. } | TimerStatus::Paused { .. } => {
                return Ok(RunOutcome::Left(timer.phase()));
            }
        }
    }
}
