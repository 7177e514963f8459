//! Human-readable error descriptions, exit codes and structured JSON errors.

use eggtimer_core::error::{BuildError, EggTimerError, ParseParamError, TimerError};
use eggtimer_core::store::StoreError;
use thiserror::Error;

/// Conditions raised by the CLI itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("interrupted")]
    Interrupted,
    #[error("no {0} parameters saved yet")]
    EmptySlot(eggtimer_core::Slot),
}

/// Exit status on success.
pub const EXIT_OK: i32 = 0;
/// Invalid parameters or flags.
pub const EXIT_INVALID: i32 = 2;
/// Config file unreadable or rejected.
pub const EXIT_CONFIG: i32 = 3;
/// Saved parameters could not be read or written.
pub const EXIT_STORAGE: i32 = 4;
/// Stopped with Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ce) = err.downcast_ref::<CliError>() {
        return match ce {
            CliError::Interrupted => {
                "What happened: The countdown was stopped before the eggs were done.\nLikely causes: Ctrl-C or a termination signal.\nHow to fix: Run `eggtimer cook --from last` to start over.".to_string()
            }
            CliError::EmptySlot(slot) => format!(
                "What happened: No {slot} parameters are saved yet.\nLikely causes: Nothing was cooked or saved with this storage directory.\nHow to fix: Run `eggtimer favorite save` or a `cook` first, or drop --from."
            ),
        };
    }

    if let Some(ee) = err.downcast_ref::<EggTimerError>() {
        return match ee {
            EggTimerError::Invalid(messages) => format!(
                "What happened: The cooking parameters are invalid.\n{}\nHow to fix: Adjust --mass (or the [validation] bounds in the config) and retry.",
                messages
                    .iter()
                    .map(|m| format!("  - {m}"))
                    .collect::<Vec<_>>()
                    .join("\n")
            ),
            EggTimerError::Config(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Missing file, bad TOML or out-of-range values.\nHow to fix: Edit the config file, then rerun. Every section is optional."
            ),
            EggTimerError::Storage(msg) => format!(
                "What happened: Saved parameters could not be accessed ({msg}).\nLikely causes: Unwritable state directory or a corrupt slot file.\nHow to fix: Check [storage] dir in the config or delete the broken file."
            ),
            EggTimerError::PermissionDenied => {
                "What happened: Notifications are not permitted.\nLikely causes: [notifications] enabled = false.\nHow to fix: Enable notifications in the config; the countdown works without them.".to_string()
            }
            other => format!(
                "What happened: {other}.\nLikely causes: See logs.\nHow to fix: Re-run with --log-level=debug or set RUST_LOG for more detail."
            ),
        };
    }

    if let Some(pe) = err.downcast_ref::<ParseParamError>() {
        return format!(
            "What happened: {pe}.\nHow to fix: Use one of the listed values."
        );
    }

    if let Some(te) = err.downcast_ref::<TimerError>() {
        return format!(
            "What happened: Timer refused the request ({te}).\nHow to fix: Stop the current countdown first."
        );
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return format!(
            "What happened: Could not assemble the cooking session ({be}).\nHow to fix: Check the [validation] section of the config."
        );
    }

    if let Some(se) = err.downcast_ref::<StoreError>() {
        return format!(
            "What happened: {se}.\nHow to fix: Check [storage] dir in the config or delete the broken file."
        );
    }

    let msg = err.to_string();
    let lower = msg.to_ascii_lowercase();

    // Breed catalog CSV header special-case
    if lower.contains("breed catalog csv must have headers") {
        return "Invalid headers in breed catalog CSV. Expected 'name,origin,egg_color'.".to_string();
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit codes per error class; anything unrecognized is 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ce) = err.downcast_ref::<CliError>() {
        return match ce {
            CliError::Interrupted => EXIT_INTERRUPTED,
            CliError::EmptySlot(_) => 1,
        };
    }
    if let Some(ee) = err.downcast_ref::<EggTimerError>() {
        return match ee {
            EggTimerError::Invalid(_) => EXIT_INVALID,
            EggTimerError::Config(_) => EXIT_CONFIG,
            EggTimerError::Storage(_) => EXIT_STORAGE,
            _ => 1,
        };
    }
    if err.downcast_ref::<ParseParamError>().is_some() {
        return EXIT_INVALID;
    }
    if err.downcast_ref::<StoreError>().is_some() {
        return EXIT_STORAGE;
    }
    1
}

/// Short machine-readable reason for JSON output.
pub fn reason_name(err: &eyre::Report) -> &'static str {
    if let Some(ce) = err.downcast_ref::<CliError>() {
        return match ce {
            CliError::Interrupted => "Interrupted",
            CliError::EmptySlot(_) => "EmptySlot",
        };
    }
    if let Some(ee) = err.downcast_ref::<EggTimerError>() {
        return match ee {
            EggTimerError::Invalid(_) => "Invalid",
            EggTimerError::Config(_) => "Config",
            EggTimerError::Storage(_) => "Storage",
            EggTimerError::PermissionDenied => "PermissionDenied",
            EggTimerError::Notification(_) => "Notification",
            EggTimerError::State(_) => "State",
        };
    }
    if err.downcast_ref::<ParseParamError>().is_some() {
        return "Invalid";
    }
    if err.downcast_ref::<StoreError>().is_some() {
        return "Storage";
    }
    "Error"
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    if let Some(EggTimerError::Invalid(messages)) = err.downcast_ref::<EggTimerError>() {
        return json!({
            "reason": "Invalid",
            "details": { "messages": messages },
            "message": humanize(err),
        })
        .to_string();
    }
    json!({ "reason": reason_name(err), "message": humanize(err) }).to_string()
}
