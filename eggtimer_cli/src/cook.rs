//! The `cook` command: commit the parameters and drive the countdown.

use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use eggtimer_config::Config;
use eggtimer_core::runner::{RunOutcome, run_to_completion};
use eggtimer_core::util::{display_seconds, format_mm_ss, seconds_to_duration};
use eggtimer_core::{EggTimerError, TimerCfg, TimerStatus};
use serde_json::json;

use crate::cli::ParamArgs;
use crate::commands::build_session;
use crate::error_fmt::CliError;

pub fn run_cook(
    cfg: &Config,
    args: &ParamArgs,
    seconds: Option<f64>,
    json: bool,
    shutdown: Arc<AtomicBool>,
) -> eyre::Result<()> {
    let override_duration = seconds
        .map(|s| {
            seconds_to_duration(s).ok_or_else(|| {
                EggTimerError::Invalid(vec![format!(
                    "--seconds must be a finite number >= 0, got {s}"
                )])
            })
        })
        .transpose()?;

    let mut session = build_session(cfg, args)?;
    if let Err(e) = session.timer_mut().request_permission() {
        tracing::warn!(error = %e, "notifications unavailable; countdown only");
    }
    let commit = session.commit_with(override_duration)?;
    let committed = session.timer().committed();
    tracing::info!(
        seconds = committed.as_secs_f64(),
        branch = commit.estimate.branch.as_str(),
        "cooking"
    );
    if !json {
        println!(
            "Cooking for {} ({} estimate). Ctrl-C to stop.",
            format_mm_ss(committed),
            commit.estimate.branch.as_str()
        );
    }

    let timer_cfg = TimerCfg::from(&cfg.timer);
    let mut last_shown = u64::MAX;
    let outcome = run_to_completion(session.timer_mut(), &timer_cfg, &shutdown, |status| {
        if json {
            return;
        }
        if let TimerStatus::Running { remaining } = status {
            let shown = display_seconds(*remaining);
            if shown != last_shown {
                last_shown = shown;
                print!("\r{} remaining ", format_mm_ss(*remaining));
                let _ = std::io::stdout().flush();
            }
        }
    })?;

    match outcome {
        RunOutcome::Completed => {
            if json {
                println!(
                    "{}",
                    json!({
                        "outcome": "completed",
                        "seconds": committed.as_secs_f64(),
                        "estimate_seconds": commit.estimate.total_seconds,
                        "branch": commit.estimate.branch.as_str(),
                    })
                );
            } else {
                println!("\r{}", cfg.notifications.message);
            }
            Ok(())
        }
        RunOutcome::Interrupted => {
            if !json {
                println!();
            }
            Err(eyre::Report::new(CliError::Interrupted))
        }
        RunOutcome::Left(phase) => Err(eyre::Report::new(EggTimerError::State(format!(
            "countdown left running unexpectedly ({phase})"
        )))),
    }
}
