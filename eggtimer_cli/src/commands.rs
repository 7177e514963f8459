//! Parameter resolution, session assembly and the short-lived commands.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eggtimer_config::Config;
use eggtimer_core::breeds::{BreedOrigin, fetch_breed_or_fallback};
use eggtimer_core::util::format_mm_ss;
use eggtimer_core::{
    BreedCfg, CookParameters, CookSession, EggTimerError, Estimate, FileParameterStore,
    ParameterStore, Preview, Slot, ValidationCfg,
};
use eggtimer_gateways::{AlertSink, ListBreedSource, ThreadNotifier};
use eggtimer_traits::{Breed, WallClock};
use eyre::WrapErr;
use serde_json::json;

use crate::cli::ParamArgs;
use crate::error_fmt::CliError;

pub type Session = CookSession<ThreadNotifier, FileParameterStore>;

// ── Assembly ─────────────────────────────────────────────────────────────────

pub fn storage_dir(cfg: &Config) -> PathBuf {
    cfg.storage
        .dir
        .as_ref()
        .map_or_else(FileParameterStore::default_dir, PathBuf::from)
}

fn alert_sink() -> AlertSink {
    Arc::new(|msg: &str| {
        tracing::info!(message = msg, "completion alert");
        eprint!("\x07");
    })
}

pub fn notifier(cfg: &Config) -> ThreadNotifier {
    ThreadNotifier::new(cfg.notifications.message.clone())
        .with_sink(alert_sink())
        .with_enabled(cfg.notifications.enabled)
}

/// Base parameters (config defaults or a stored slot) with the flags applied.
pub fn resolve_params(
    cfg: &Config,
    store: &FileParameterStore,
    args: &ParamArgs,
) -> eyre::Result<CookParameters> {
    let mut p = match args.from {
        Some(slot) => store
            .load(slot)
            .map_err(|e| EggTimerError::Storage(e.to_string()))
            .wrap_err_with(|| format!("loading {slot} parameters"))?
            .ok_or(CliError::EmptySlot(slot))?,
        None => CookParameters::try_from(&cfg.defaults)
            .map_err(|e| EggTimerError::Config(e.to_string()))?,
    };
    // Class before mass and mode before temperature: the first of each pair
    // resets the second.
    if let Some(egg) = args.egg {
        p = p.with_egg_class(egg);
    }
    if let Some(m) = args.mass {
        p = p.with_mass(m);
    }
    if let Some(mode) = args.start {
        p = p.with_start_mode(mode);
    }
    if let Some(t) = args.temp {
        p = p.with_start_temperature(Some(t));
    }
    if let Some(d) = args.doneness {
        p = p.with_doneness(d);
    }
    if let Some(w) = args.water {
        p = p.with_water_start(w);
    }
    Ok(p)
}

pub fn build_session(cfg: &Config, args: &ParamArgs) -> eyre::Result<Session> {
    let store = FileParameterStore::new(storage_dir(cfg));
    let params = resolve_params(cfg, &store, args)?;
    session_with(cfg, store, params)
}

fn session_with(
    cfg: &Config,
    store: FileParameterStore,
    params: CookParameters,
) -> eyre::Result<Session> {
    CookSession::builder()
        .with_notifier(notifier(cfg))
        .with_store(store)
        .with_clock(Arc::new(WallClock::new()))
        .with_validation(ValidationCfg::from(&cfg.validation))
        .with_params(params)
        .build()
}

// ── Output helpers ───────────────────────────────────────────────────────────

pub fn estimate_json(params: &CookParameters, e: &Estimate) -> serde_json::Value {
    json!({
        "valid": true,
        "params": params,
        "total_seconds": e.total_seconds,
        "heatup_seconds": e.heatup_seconds,
        "cooking_seconds": e.cooking_seconds,
        "branch": e.branch.as_str(),
        "mm_ss": format_mm_ss(std::time::Duration::from_secs_f64(e.total_seconds)),
    })
}

fn print_params(p: &CookParameters) {
    println!(
        "Egg: {} ({:.1} g), start: {} at {:.1} °C, doneness: {}, water: {}",
        p.egg_class,
        p.mass_g,
        p.start_mode,
        p.start_temperature_c(),
        p.doneness,
        p.water_start
    );
}

fn print_estimate(e: &Estimate) {
    println!(
        "Estimate: {} ({:.1} s)",
        format_mm_ss(std::time::Duration::from_secs_f64(e.total_seconds)),
        e.total_seconds
    );
    println!("  branch:  {}", e.branch.as_str());
    println!("  heat-up: {:.1} s", e.heatup_seconds);
    println!("  cooking: {:.1} s", e.cooking_seconds);
}

/// Print the preview; invalid parameters become `EggTimerError::Invalid`.
fn report_preview(params: &CookParameters, preview: &Preview, json: bool) -> eyre::Result<()> {
    match &preview.estimate {
        Some(e) if json => println!("{}", estimate_json(params, e)),
        Some(e) => {
            print_params(params);
            print_estimate(e);
        }
        None => {
            if json {
                println!(
                    "{}",
                    json!({ "valid": false, "messages": preview.report.messages })
                );
            }
            return Err(eyre::Report::new(EggTimerError::Invalid(
                preview.report.messages.clone(),
            )));
        }
    }
    Ok(())
}

// ── Commands ─────────────────────────────────────────────────────────────────

pub fn run_estimate(cfg: &Config, args: &ParamArgs, json: bool) -> eyre::Result<()> {
    let session = build_session(cfg, args)?;
    report_preview(session.params(), session.preview(), json)
}

pub fn run_validate(cfg: &Config, args: &ParamArgs, json: bool) -> eyre::Result<()> {
    let session = build_session(cfg, args)?;
    let report = &session.preview().report;
    if json {
        println!(
            "{}",
            json!({ "valid": report.is_valid(), "messages": report.messages })
        );
    } else if report.is_valid() {
        println!("Parameters are valid.");
    } else {
        for m in &report.messages {
            println!("invalid: {m}");
        }
    }
    if report.is_valid() {
        Ok(())
    } else {
        Err(eyre::Report::new(EggTimerError::Invalid(report.messages.clone())))
    }
}

pub fn run_favorite_save(cfg: &Config, args: &ParamArgs, json: bool) -> eyre::Result<()> {
    let mut session = build_session(cfg, args)?;
    if !session.preview().report.is_valid() {
        return Err(eyre::Report::new(EggTimerError::Invalid(
            session.preview().report.messages.clone(),
        )));
    }
    session.save_favorite()?;
    if json {
        println!("{}", json!({ "saved": "favorite", "params": session.params() }));
    } else {
        println!("Saved favorite.");
        print_params(session.params());
    }
    Ok(())
}

pub fn run_favorite_show(cfg: &Config, json: bool) -> eyre::Result<()> {
    let store = FileParameterStore::new(storage_dir(cfg));
    let loaded = store
        .load(Slot::Favorite)
        .map_err(|e| EggTimerError::Storage(e.to_string()))
        .wrap_err("loading favorite parameters")?;
    let Some(params) = loaded else {
        if json {
            println!("{}", json!({ "favorite": null }));
        } else {
            println!("No favorite saved.");
        }
        return Ok(());
    };
    let session = session_with(cfg, store, params)?;
    report_preview(session.params(), session.preview(), json)
}

fn breed_rows(cfg: &Config, config_dir: &Path) -> eyre::Result<Vec<Breed>> {
    let Some(csv) = &cfg.breeds.catalog_csv else {
        return Ok(Vec::new());
    };
    let path = config_dir.join(csv);
    let rows = eggtimer_config::load_breed_csv(&path)?;
    Ok(rows
        .into_iter()
        .map(|r| Breed {
            name: r.name,
            origin: r.origin,
            egg_color: r.egg_color,
        })
        .collect())
}

pub fn run_fact(cfg: &Config, config_dir: &Path, json: bool) -> eyre::Result<()> {
    let source = ListBreedSource::new(breed_rows(cfg, config_dir)?);
    let fact = fetch_breed_or_fallback(Arc::new(source), &BreedCfg::from(&cfg.breeds));
    let b = &fact.breed;
    let from = match fact.origin {
        BreedOrigin::Source => "catalog",
        BreedOrigin::Fallback => "fallback",
    };
    if json {
        println!(
            "{}",
            json!({ "name": b.name, "origin": b.origin, "egg_color": b.egg_color, "source": from })
        );
        return Ok(());
    }
    let mut line = format!("Did you know? The {}", b.name);
    if let Some(o) = &b.origin {
        line.push_str(&format!(" comes from {o}"));
    }
    if let Some(c) = &b.egg_color {
        if b.origin.is_some() {
            line.push_str(" and");
        }
        line.push_str(&format!(" lays {c} eggs"));
    }
    println!("{line}.");
    Ok(())
}

pub fn run_self_check(cfg: &Config, json: bool) -> eyre::Result<()> {
    let dir = storage_dir(cfg);
    let probe = dir.join(".self-check");
    std::fs::create_dir_all(&dir)
        .and_then(|()| std::fs::write(&probe, b"ok"))
        .and_then(|()| std::fs::remove_file(&probe))
        .map_err(|e| EggTimerError::Storage(format!("{}: {e}", dir.display())))?;

    let mut n = notifier(cfg);
    let notifications = match eggtimer_traits::Notifier::request_permission(&mut n) {
        Ok(()) => "ok",
        Err(e) => {
            tracing::warn!(error = %e, "notification permission unavailable");
            "denied"
        }
    };

    if json {
        println!(
            "{}",
            json!({
                "config": "ok",
                "storage": dir.display().to_string(),
                "notifications": notifications,
            })
        );
    } else {
        println!("config: ok");
        println!("storage: ok ({})", dir.display());
        println!("notifications: {notifications}");
        println!("OK");
    }
    Ok(())
}
