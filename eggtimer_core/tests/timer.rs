use std::sync::Arc;
use std::time::Duration;

use eggtimer_core::mocks::{ManualClock, NotifierCall, RecordingNotifier};
use eggtimer_core::{CookTimer, TimerError, TimerPhase, TimerStatus};
use rstest::{fixture, rstest};

const SECS_300: Duration = Duration::from_secs(300);

#[fixture]
fn clock() -> ManualClock {
    ManualClock::new()
}

fn timer_on(clock: &ManualClock) -> CookTimer<RecordingNotifier> {
    CookTimer::with_clock(RecordingNotifier::new(), Arc::new(clock.clone()))
}

#[rstest]
fn pause_keeps_remaining_and_reset_restores_committed(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(SECS_300)).unwrap();
    clock.advance_secs(120);
    assert_eq!(
        t.pause().unwrap(),
        TimerStatus::Paused {
            remaining: Duration::from_secs(180)
        }
    );
    assert_eq!(t.committed(), SECS_300);

    // Time passing while paused changes nothing.
    clock.advance_secs(1_000);
    assert_eq!(t.remaining(), Duration::from_secs(180));

    assert_eq!(t.reset(), TimerStatus::Idle { remaining: SECS_300 });
    assert_eq!(t.phase(), TimerPhase::Idle);
}

#[rstest]
fn suspension_past_deadline_completes_on_foreground(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(Duration::from_secs(10))).unwrap();
    clock.advance_secs(15);
    assert_eq!(t.on_foreground(), TimerStatus::Completed);
    assert_eq!(t.phase(), TimerPhase::Completed);
    assert_eq!(t.remaining(), Duration::ZERO);
    assert_eq!(t.active_registration(), None);
}

#[rstest]
fn resume_counts_down_from_paused_baseline(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(SECS_300)).unwrap();
    clock.advance_secs(100);
    t.pause().unwrap();
    clock.advance_secs(500);
    t.start(None).unwrap();
    assert_eq!(t.remaining(), Duration::from_secs(200));
    clock.advance_secs(50);
    assert_eq!(
        t.status(),
        TimerStatus::Running {
            remaining: Duration::from_secs(150)
        }
    );
    assert_eq!(t.committed(), SECS_300);
}

#[rstest]
fn remaining_follows_deadline_not_tick_count(clock: ManualClock) {
    let mut t = timer_on(&clock);
    let reg = t.start(Some(SECS_300)).unwrap();
    // One late tick after 250 s sees the full elapsed time.
    clock.advance_secs(250);
    assert_eq!(
        t.on_tick(reg),
        TimerStatus::Running {
            remaining: Duration::from_secs(50)
        }
    );
    // Many ticks without time passing change nothing.
    for _ in 0..10 {
        t.on_tick(reg);
    }
    assert_eq!(t.remaining(), Duration::from_secs(50));
}

#[rstest]
fn tick_at_deadline_completes_and_drops_registration(clock: ManualClock) {
    let mut t = timer_on(&clock);
    let reg = t.start(Some(Duration::from_secs(5))).unwrap();
    clock.advance_secs(5);
    assert_eq!(t.on_tick(reg), TimerStatus::Completed);
    assert_eq!(t.active_registration(), None);
    // Later ticks from the same registration are ignored.
    assert_eq!(t.on_tick(reg), TimerStatus::Completed);
}

#[rstest]
fn stale_registration_is_ignored(clock: ManualClock) {
    let mut t = timer_on(&clock);
    let old = t.start(Some(Duration::from_secs(5))).unwrap();
    t.pause().unwrap();
    assert_eq!(
        t.on_tick(old),
        TimerStatus::Paused {
            remaining: Duration::from_secs(5)
        }
    );

    let new = t.start(None).unwrap();
    clock.advance_secs(10);
    t.on_tick(old);
    assert_eq!(t.phase(), TimerPhase::Running);
    assert_eq!(t.on_tick(new), TimerStatus::Completed);
}

#[rstest]
fn start_after_completion_restarts_committed(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(Duration::from_secs(5))).unwrap();
    clock.advance_secs(6);
    assert!(t.status().is_completed());
    t.start(None).unwrap();
    assert_eq!(t.remaining(), Duration::from_secs(5));
}

#[rstest]
fn invalid_transitions_are_typed(clock: ManualClock) {
    let mut t = timer_on(&clock);
    assert_eq!(
        t.pause(),
        Err(TimerError::InvalidTransition {
            phase: TimerPhase::Idle,
            event: "pause"
        })
    );
    t.start(Some(SECS_300)).unwrap();
    assert_eq!(
        t.start(Some(SECS_300)),
        Err(TimerError::InvalidTransition {
            phase: TimerPhase::Running,
            event: "start"
        })
    );
}

#[rstest]
fn reset_is_idempotent(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(SECS_300)).unwrap();
    let first = t.reset();
    assert_eq!(t.reset(), first);
    assert_eq!(t.snapshot().deadline, None);
}

#[rstest]
fn tick_and_foreground_outside_running_are_noops(clock: ManualClock) {
    let mut t = timer_on(&clock);
    let reg = t.start(Some(SECS_300)).unwrap();
    t.pause().unwrap();
    t.notifier_mut().clear();
    t.on_foreground();
    t.on_tick(reg);
    assert!(t.notifier().calls().is_empty());
    assert_eq!(t.phase(), TimerPhase::Paused);
}

// ── Notifier interaction ─────────────────────────────────────────────────────

#[rstest]
fn start_schedules_and_pause_cancels(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(SECS_300)).unwrap();
    clock.advance_secs(30);
    t.pause().unwrap();
    assert_eq!(
        t.notifier().calls(),
        &[
            NotifierCall::CancelAll,
            NotifierCall::Schedule(SECS_300),
            NotifierCall::CancelAll,
        ]
    );
}

#[rstest]
fn foreground_reschedules_for_what_is_left(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(SECS_300)).unwrap();
    clock.advance_secs(100);
    t.notifier_mut().clear();
    t.on_foreground();
    assert_eq!(
        t.notifier().calls(),
        &[
            NotifierCall::CancelAll,
            NotifierCall::Schedule(Duration::from_secs(200)),
        ]
    );
}

#[rstest]
fn stop_clears_badge(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(SECS_300)).unwrap();
    assert_eq!(t.stop(), TimerStatus::Idle { remaining: SECS_300 });
    assert_eq!(t.notifier().calls().last(), Some(&NotifierCall::ClearBadge));
}

#[rstest]
fn notifier_failures_do_not_stop_the_countdown(clock: ManualClock) {
    let mut t = CookTimer::with_clock(RecordingNotifier::failing(), Arc::new(clock.clone()));
    let reg = t.start(Some(Duration::from_secs(60))).unwrap();
    assert_eq!(t.phase(), TimerPhase::Running);
    assert_eq!(t.notifier_failures(), 2);
    clock.advance_secs(60);
    assert_eq!(t.on_tick(reg), TimerStatus::Completed);
    assert!(t.request_permission().is_err());
}

#[rstest]
fn stop_after_completion_cancels_pending_alert(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(Duration::from_secs(10))).unwrap();
    clock.advance_secs(10);
    assert_eq!(t.status(), TimerStatus::Completed);
    t.notifier_mut().clear();
    assert_eq!(t.stop(), TimerStatus::Idle { remaining: Duration::from_secs(10) });
    assert_eq!(
        t.notifier().calls(),
        &[NotifierCall::CancelAll, NotifierCall::ClearBadge]
    );
}

#[rstest]
fn pause_past_deadline_completes_and_keeps_alert(clock: ManualClock) {
    let mut t = timer_on(&clock);
    t.start(Some(Duration::from_secs(10))).unwrap();
    clock.advance_secs(15);
    t.notifier_mut().clear();
    assert_eq!(t.pause(), Ok(TimerStatus::Completed));
    assert_eq!(t.phase(), TimerPhase::Completed);
    assert_eq!(t.active_registration(), None);
    assert!(t.notifier().calls().is_empty());
}
