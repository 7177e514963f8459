//! Persistence of cook parameters in named slots.
//!
//! Two slots exist: `last` (written on every successful commit) and
//! `favorite` (written on request). [`FileParameterStore`] keeps one TOML file
//! per slot and replaces it atomically (temp file + rename).

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;

use crate::error::ParseParamError;
use crate::params::CookParameters;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Last,
    Favorite,
}

impl Slot {
    pub const fn as_str(self) -> &'static str {
        match self {
            Slot::Last => "last",
            Slot::Favorite => "favorite",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Slot {
    type Err = ParseParamError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last" => Ok(Slot::Last),
            "favorite" | "favourite" | "fav" => Ok(Slot::Favorite),
            _ => Err(ParseParamError::new("slot", s, "last|favorite")),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode parameters: {0}")]
    Encode(#[from] toml::ser::Error),
    #[error("corrupt parameter file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Slot-addressed parameter storage.
pub trait ParameterStore {
    fn save(&mut self, slot: Slot, params: &CookParameters) -> Result<(), StoreError>;
    /// `Ok(None)` when the slot has never been written.
    fn load(&self, slot: Slot) -> Result<Option<CookParameters>, StoreError>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    slots: HashMap<Slot, CookParameters>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParameterStore for MemoryStore {
    fn save(&mut self, slot: Slot, params: &CookParameters) -> Result<(), StoreError> {
        self.slots.insert(slot, *params);
        Ok(())
    }

    fn load(&self, slot: Slot) -> Result<Option<CookParameters>, StoreError> {
        Ok(self.slots.get(&slot).copied())
    }
}

/// One `<slot>.toml` file per slot under `dir`.
#[derive(Debug, Clone)]
pub struct FileParameterStore {
    dir: PathBuf,
}

impl FileParameterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `$XDG_STATE_HOME/eggtimer`, else `$HOME/.local/state/eggtimer`, else
    /// `./.eggtimer`.
    pub fn default_dir() -> PathBuf {
        if let Some(state) = std::env::var_os("XDG_STATE_HOME").filter(|s| !s.is_empty()) {
            return PathBuf::from(state).join("eggtimer");
        }
        if let Some(home) = std::env::var_os("HOME").filter(|s| !s.is_empty()) {
            return PathBuf::from(home).join(".local/state/eggtimer");
        }
        PathBuf::from(".eggtimer")
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, slot: Slot) -> PathBuf {
        self.dir.join(format!("{}.toml", slot.as_str()))
    }
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl ParameterStore for FileParameterStore {
    fn save(&mut self, slot: Slot, params: &CookParameters) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.dir).map_err(io_err(&self.dir))?;
        let body = toml::to_string(params)?;
        let path = self.path_for(slot);
        let tmp = self.dir.join(format!(".{}.toml.tmp", slot.as_str()));
        std::fs::write(&tmp, body).map_err(io_err(&tmp))?;
        std::fs::rename(&tmp, &path).map_err(io_err(&path))?;
        tracing::debug!(slot = %slot, path = %path.display(), "parameters saved");
        Ok(())
    }

    fn load(&self, slot: Slot) -> Result<Option<CookParameters>, StoreError> {
        let path = self.path_for(slot);
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_err(&path)(e)),
        };
        let params = toml::from_str(&text).map_err(|source| StoreError::Decode {
            path: path.clone(),
            source,
        })?;
        Ok(Some(params))
    }
}
