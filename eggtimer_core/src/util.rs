//! Common time helpers for eggtimer_core.

use std::time::Duration;

/// Number of seconds in one minute.
pub const SECS_PER_MIN: u64 = 60;

/// Whole seconds shown on a countdown: rounds up so the display reads `00:00`
/// only once the deadline has actually passed.
#[inline]
pub fn display_seconds(d: Duration) -> u64 {
    let secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        secs.saturating_add(1)
    } else {
        secs
    }
}

/// Format a countdown as `MM:SS`. Minutes are not wrapped at 60.
pub fn format_mm_ss(d: Duration) -> String {
    let s = display_seconds(d);
    format!("{:02}:{:02}", s / SECS_PER_MIN, s % SECS_PER_MIN)
}

/// Convert estimator seconds into a `Duration`.
/// Returns `None` for NaN, negative or overflowing input.
#[inline]
pub fn seconds_to_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_ss_rounds_up_partial_seconds() {
        assert_eq!(format_mm_ss(Duration::from_millis(287_100)), "04:48");
        assert_eq!(format_mm_ss(Duration::from_secs(288)), "04:48");
        assert_eq!(format_mm_ss(Duration::ZERO), "00:00");
        assert_eq!(format_mm_ss(Duration::from_secs(3725)), "62:05");
    }

    #[test]
    fn seconds_conversion_rejects_nan_and_negative() {
        assert_eq!(seconds_to_duration(f64::NAN), None);
        assert_eq!(seconds_to_duration(-0.5), None);
        assert_eq!(seconds_to_duration(1.5), Some(Duration::from_millis(1500)));
    }
}
