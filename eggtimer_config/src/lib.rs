#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and breed catalog parsing for the egg timer.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//!   Every section is optional; an empty file is a valid config.
//! - The breed catalog CSV loader enforces headers before reading rows.
use serde::Deserialize;

/// Breed catalog CSV schema.
///
/// Expected headers:
/// name,origin,egg_color
///
/// Example:
/// name,origin,egg_color
/// Marans,France,dark brown
/// Ameraucana,United States,blue
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct BreedRow {
    pub name: String,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub egg_color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimerCfg {
    /// Period of the recurring countdown evaluation (ms).
    pub tick_ms: u64,
    /// A gap between ticks longer than this is treated as a suspension and
    /// triggers a re-arm of the completion notification.
    pub resume_gap_ms: u64,
}

impl Default for TimerCfg {
    fn default() -> Self {
        Self {
            tick_ms: 1000,
            resume_gap_ms: 2500,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ValidationCfg {
    pub min_mass_g: f64,
    pub max_mass_g: f64,
}

impl Default for ValidationCfg {
    fn default() -> Self {
        Self {
            min_mass_g: 30.0,
            max_mass_g: 90.0,
        }
    }
}

/// Initial cooking parameters. Enum values are kept as strings here and
/// parsed by the core so this crate stays free of domain types.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DefaultsCfg {
    pub egg_class: String,
    /// Overrides the class default mass when set.
    pub mass_g: Option<f64>,
    /// Also accepts "from_fridge" / "from_room".
    pub start_mode: String,
    /// Optional start temperature override in °C.
    #[serde(alias = "start_temp_c")]
    pub start_temperature_c: Option<f64>,
    pub doneness: String,
    pub water_start: String,
}

impl Default for DefaultsCfg {
    fn default() -> Self {
        Self {
            egg_class: "medium".to_string(),
            mass_g: None,
            start_mode: "fridge".to_string(),
            start_temperature_c: None,
            doneness: "medium".to_string(),
            water_start: "boiling".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NotificationsCfg {
    pub enabled: bool,
    pub message: String,
}

impl Default for NotificationsCfg {
    fn default() -> Self {
        Self {
            enabled: true,
            message: "Your eggs are ready!".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StorageCfg {
    /// Directory holding the "last" and "favorite" parameter files.
    /// Falls back to `$XDG_STATE_HOME/eggtimer` or `$HOME/.local/state/eggtimer`.
    pub dir: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BreedsCfg {
    /// Optional breed catalog CSV (strict header).
    pub catalog_csv: Option<String>,
    /// Max wait for the catalog lookup before using the fallback list (ms).
    pub timeout_ms: u64,
}

impl Default for BreedsCfg {
    fn default() -> Self {
        Self {
            catalog_csv: None,
            timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub timer: TimerCfg,
    pub validation: ValidationCfg,
    pub defaults: DefaultsCfg,
    pub notifications: NotificationsCfg,
    pub storage: StorageCfg,
    pub breeds: BreedsCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_breed_csv(path: &std::path::Path) -> eyre::Result<Vec<BreedRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open breed catalog CSV {:?}: {}", path, e))?;

    // Enforce exact headers
    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let expected = ["name", "origin", "egg_color"];
    let actual: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if actual != expected {
        eyre::bail!(
            "breed catalog CSV must have headers 'name,origin,egg_color', got: {}",
            actual.join(",")
        );
    }

    let mut rows = Vec::new();
    for (idx, rec) in rdr.deserialize::<BreedRow>().enumerate() {
        match rec {
            Ok(mut row) => {
                if row.name.is_empty() {
                    eyre::bail!("invalid CSV row {}: empty breed name", idx + 2);
                }
                row.origin = row.origin.filter(|s| !s.is_empty());
                row.egg_color = row.egg_color.filter(|s| !s.is_empty());
                rows.push(row);
            }
            Err(e) => {
                eyre::bail!("invalid CSV row {}: {}", idx + 2, e);
            }
        }
    }
    Ok(rows)
}

const EGG_CLASSES: [&str; 3] = ["small", "medium", "large"];
const START_MODES: [&str; 4] = ["fridge", "room", "from_fridge", "from_room"];
const DONENESS: [&str; 3] = ["soft", "medium", "hard"];
const WATER_STARTS: [&str; 2] = ["cold", "boiling"];
const ROTATIONS: [&str; 3] = ["never", "daily", "hourly"];

fn one_of(field: &str, value: &str, allowed: &[&str]) -> eyre::Result<()> {
    if !allowed.contains(&value.to_ascii_lowercase().as_str()) {
        eyre::bail!("{field} must be one of {}, got '{value}'", allowed.join("|"));
    }
    Ok(())
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Timer
        if self.timer.tick_ms == 0 {
            eyre::bail!("timer.tick_ms must be >= 1");
        }
        if self.timer.tick_ms > 60_000 {
            eyre::bail!("timer.tick_ms is unreasonably large (>60s)");
        }
        if self.timer.resume_gap_ms <= self.timer.tick_ms {
            eyre::bail!("timer.resume_gap_ms must be > timer.tick_ms");
        }

        // Validation bounds
        let (lo, hi) = (self.validation.min_mass_g, self.validation.max_mass_g);
        if !lo.is_finite() || !hi.is_finite() {
            eyre::bail!("validation mass bounds must be finite");
        }
        if lo <= 0.0 {
            eyre::bail!("validation.min_mass_g must be > 0");
        }
        if lo >= hi {
            eyre::bail!("validation.min_mass_g must be < validation.max_mass_g");
        }

        // Defaults
        one_of("defaults.egg_class", &self.defaults.egg_class, &EGG_CLASSES)?;
        one_of("defaults.start_mode", &self.defaults.start_mode, &START_MODES)?;
        one_of("defaults.doneness", &self.defaults.doneness, &DONENESS)?;
        one_of("defaults.water_start", &self.defaults.water_start, &WATER_STARTS)?;
        if let Some(m) = self.defaults.mass_g
            && !m.is_finite()
        {
            eyre::bail!("defaults.mass_g must be finite");
        }
        if let Some(t) = self.defaults.start_temperature_c
            && !t.is_finite()
        {
            eyre::bail!("defaults.start_temperature_c must be finite");
        }

        // Breeds
        if self.breeds.timeout_ms == 0 {
            eyre::bail!("breeds.timeout_ms must be >= 1");
        }

        // Logging
        if let Some(rot) = &self.logging.rotation {
            one_of("logging.rotation", rot, &ROTATIONS)?;
        }

        Ok(())
    }
}
