use std::sync::Arc;
use std::sync::atomic::AtomicBool;
use std::time::{Duration, Instant};

use eggtimer_core::mocks::{ManualClock, NoopNotifier, RecordingNotifier};
use eggtimer_core::runner::{RunOutcome, run_to_completion};
use eggtimer_core::ticker::Ticker;
use eggtimer_core::{CookTimer, TimerCfg, TimerPhase, TimerStatus};

fn fast_cfg(resume_gap: Duration) -> TimerCfg {
    TimerCfg {
        tick: Duration::from_millis(5),
        resume_gap,
    }
}

#[test]
fn ticker_emits_its_registration_and_joins_on_drop() {
    let mut t = CookTimer::new(NoopNotifier);
    let reg = t.start(Some(Duration::from_secs(60))).unwrap();
    let ticker = Ticker::spawn(reg, Duration::from_millis(5));
    assert_eq!(ticker.recv_timeout(Duration::from_secs(1)), Some(reg));
    assert_eq!(ticker.registration(), reg);
    assert!(ticker.emitted() >= 1);

    let started = Instant::now();
    drop(ticker);
    assert!(started.elapsed() < Duration::from_millis(500));
}

#[test]
fn long_period_ticker_still_drops_promptly() {
    let mut t = CookTimer::new(NoopNotifier);
    let reg = t.start(Some(Duration::from_secs(60))).unwrap();
    let ticker = Ticker::spawn(reg, Duration::from_secs(30));
    let started = Instant::now();
    drop(ticker);
    assert!(started.elapsed() < Duration::from_secs(1));
}

#[test]
fn runner_completes_short_countdown() {
    let mut t = CookTimer::new(NoopNotifier);
    t.start(Some(Duration::from_millis(40))).unwrap();
    let shutdown = AtomicBool::new(false);
    let mut seen = Vec::new();
    let outcome = run_to_completion(&mut t, &fast_cfg(Duration::from_secs(10)), &shutdown, |s| {
        seen.push(*s);
    })
    .unwrap();
    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(seen.last(), Some(&TimerStatus::Completed));
    assert_eq!(t.phase(), TimerPhase::Completed);
}

#[test]
fn runner_stops_timer_on_shutdown() {
    let mut t = CookTimer::new(RecordingNotifier::new());
    t.start(Some(Duration::from_secs(60))).unwrap();
    let shutdown = AtomicBool::new(true);
    let outcome =
        run_to_completion(&mut t, &fast_cfg(Duration::from_secs(10)), &shutdown, |_| {}).unwrap();
    assert_eq!(outcome, RunOutcome::Interrupted);
    assert_eq!(t.phase(), TimerPhase::Idle);
}

#[test]
fn runner_requires_running_timer() {
    let mut t = CookTimer::new(NoopNotifier);
    let shutdown = AtomicBool::new(false);
    assert!(run_to_completion(&mut t, &TimerCfg::default(), &shutdown, |_| {}).is_err());
}

#[test]
fn tick_gap_rearms_notification() {
    let clock = ManualClock::new();
    let mut t = CookTimer::with_clock(RecordingNotifier::new(), Arc::new(clock.clone()));
    t.start(Some(Duration::from_secs(100))).unwrap();

    let shutdown = AtomicBool::new(false);
    let progress_clock = clock.clone();
    // Every tick after the first sees a 30 s jump, as after a suspension.
    let outcome = run_to_completion(&mut t, &fast_cfg(Duration::from_secs(10)), &shutdown, |_| {
        progress_clock.advance_secs(30);
    })
    .unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    assert_eq!(
        t.notifier().scheduled(),
        vec![
            Duration::from_secs(100),
            Duration::from_secs(70),
            Duration::from_secs(40),
            Duration::from_secs(10),
        ]
    );
}
