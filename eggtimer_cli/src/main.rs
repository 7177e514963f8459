mod cli;
mod commands;
mod cook;
mod error_fmt;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use clap::Parser;
use eggtimer_config::Config;
use eggtimer_core::EggTimerError;
use eyre::WrapErr;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::cli::{Cli, Commands, DEFAULT_CONFIG_PATH, FILE_GUARD, FavoriteAction, JSON_MODE};
use crate::error_fmt::{EXIT_OK, exit_code_for_error, format_error_json, humanize};

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let code = match run(cli) {
        Ok(()) => EXIT_OK,
        Err(e) => {
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", format_error_json(&e));
            } else {
                eprintln!("{}", humanize(&e));
            }
            exit_code_for_error(&e)
        }
    };
    std::process::exit(code);
}

fn run(cli: Cli) -> eyre::Result<()> {
    let (cfg, config_dir) = load_config(cli.config.as_deref())?;
    init_tracing(cli.json, cli.log_level.as_deref(), &cfg.logging);
    tracing::debug!(config_dir = %config_dir.display(), "config loaded");

    match &cli.cmd {
        Commands::Estimate { params } => commands::run_estimate(&cfg, params, cli.json),
        Commands::Validate { params } => commands::run_validate(&cfg, params, cli.json),
        Commands::Cook { params, seconds } => {
            let shutdown = Arc::new(AtomicBool::new(false));
            let flag = shutdown.clone();
            if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Relaxed)) {
                tracing::warn!(error = %e, "could not install Ctrl-C handler");
            }
            cook::run_cook(&cfg, params, *seconds, cli.json, shutdown)
        }
        Commands::Favorite { action } => match action {
            FavoriteAction::Save { params } => commands::run_favorite_save(&cfg, params, cli.json),
            FavoriteAction::Show => commands::run_favorite_show(&cfg, cli.json),
        },
        Commands::Fact => commands::run_fact(&cfg, &config_dir, cli.json),
        Commands::SelfCheck => commands::run_self_check(&cfg, cli.json),
    }
}

/// Read and validate the config. Without `--config`, `eggtimer.toml` in the
/// working directory is used when present, else built-in defaults.
fn load_config(path: Option<&Path>) -> eyre::Result<(Config, PathBuf)> {
    let path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => Some(PathBuf::from(DEFAULT_CONFIG_PATH)).filter(|p| p.exists()),
    };
    let Some(path) = path else {
        return Ok((Config::default(), PathBuf::from(".")));
    };

    let text = std::fs::read_to_string(&path)
        .map_err(|e| EggTimerError::Config(format!("read {}: {e}", path.display())))?;
    let cfg: Config = toml::from_str(&text)
        .map_err(|e| EggTimerError::Config(format!("parse {}: {e}", path.display())))?;
    cfg.validate()
        .map_err(|e| EggTimerError::Config(e.to_string()))
        .wrap_err_with(|| format!("invalid config {}", path.display()))?;

    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    Ok((cfg, dir))
}

fn init_tracing(json: bool, cli_level: Option<&str>, logging: &eggtimer_config::Logging) {
    let level = cli_level
        .or(logging.level.as_deref())
        .unwrap_or("info")
        .to_string();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Console logs go to stderr so stdout carries only command output.
    let console = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file_layer = logging.file.as_ref().map(|file| {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|d| !d.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map_or_else(|| "eggtimer.log".into(), |n| n.to_string_lossy().into_owned());
        let appender = match logging.rotation.as_deref().unwrap_or("never") {
            "daily" => tracing_appender::rolling::daily(dir, name),
            "hourly" => tracing_appender::rolling::hourly(dir, name),
            _ => tracing_appender::rolling::never(dir, name),
        };
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        fmt::layer().json().with_writer(writer).boxed()
    });

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file_layer)
        .try_init();
}
