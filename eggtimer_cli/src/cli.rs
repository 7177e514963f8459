//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand};
use eggtimer_core::{Doneness, EggClass, Slot, StartTemperatureMode, WaterStartMode};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

/// Config file used when `--config` is not given and it exists.
pub const DEFAULT_CONFIG_PATH: &str = "eggtimer.toml";

#[derive(Parser, Debug)]
#[command(name = "eggtimer", version, about = "Egg boiling-time estimator and timer")]
pub struct Cli {
    /// Path to config TOML (every section optional)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output and log as JSON instead of text
    #[arg(long, action = ArgAction::SetTrue, global = true)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins when set
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Cooking parameter flags shared by several commands. Unset flags keep the
/// base value (config defaults, or the slot given with `--from`).
#[derive(Args, Debug, Clone, Default)]
pub struct ParamArgs {
    /// Start from a saved parameter set
    #[arg(long, value_name = "SLOT")]
    pub from: Option<Slot>,

    /// Egg class (small|medium|large); resets the mass to the class default
    #[arg(long, value_name = "CLASS")]
    pub egg: Option<EggClass>,

    /// Egg mass in grams
    #[arg(long, value_name = "GRAMS", allow_negative_numbers = true)]
    pub mass: Option<f64>,

    /// Where the egg comes from (fridge|room); clears a previous --temp
    #[arg(long, value_name = "MODE")]
    pub start: Option<StartTemperatureMode>,

    /// Starting temperature override in °C
    #[arg(long, value_name = "CELSIUS", allow_negative_numbers = true)]
    pub temp: Option<f64>,

    /// Target doneness (soft|medium|hard)
    #[arg(long, value_name = "LEVEL")]
    pub doneness: Option<Doneness>,

    /// Water at start (cold|boiling)
    #[arg(long, value_name = "MODE")]
    pub water: Option<WaterStartMode>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the recommended boiling time for the parameters
    Estimate {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Check the parameters; exits with 2 when they are invalid
    Validate {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Validate, start the countdown and wait for completion (Ctrl-C stops)
    Cook {
        #[command(flatten)]
        params: ParamArgs,
        /// Count down this many seconds instead of the estimate
        #[arg(long, value_name = "SECS", allow_negative_numbers = true)]
        seconds: Option<f64>,
    },
    /// Save or show the favorite parameter set
    Favorite {
        #[command(subcommand)]
        action: FavoriteAction,
    },
    /// Print a random chicken breed fact
    Fact,
    /// Check config, storage and notification permission
    SelfCheck,
}

#[derive(Subcommand, Debug)]
pub enum FavoriteAction {
    /// Save the given parameters as the favorite
    Save {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Show the saved favorite and its estimate
    Show,
}
