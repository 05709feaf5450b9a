//! Configuration loaded from `config.toml` in the colex home directory.

use crate::error::{ColexError, Result};
use dirs_next::home_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Database used when neither the config file nor the command line names one.
pub const DEFAULT_DATABASE: &str = "clics.sqlite";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path to the CLICS SQLite file. Relative paths are resolved against the home directory.
    #[serde(default)]
    pub database: Option<PathBuf>,
    /// Show verbose-tier diagnostics.
    #[serde(default)]
    pub verbose: bool,
}

impl Config {
    /// Load config with optional home directory override.
    ///
    /// Precedence for the home directory:
    /// 1. `home_override` parameter (from --home CLI flag)
    /// 2. `COLEX_HOME` environment variable
    /// 3. `~/.colex` default
    ///
    /// A missing `config.toml` yields the defaults.
    pub fn load(home_override: Option<PathBuf>) -> Result<Self> {
        let home = resolve_home(home_override)?;
        Self::load_from_dir(&home)
    }

    /// Load `config.toml` from `dir`, if present.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let config_path = dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let mut config: Config = toml::from_str(&content).map_err(|e| {
            ColexError::Config(format!(
                "failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })?;

        if let Some(db) = config.database.as_mut()
            && db.is_relative()
        {
            *db = dir.join(&*db);
        }
        Ok(config)
    }

    /// The configured database, or [`DEFAULT_DATABASE`] in the working directory.
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
    }
}

fn resolve_home(home_override: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = home_override {
        return Ok(path);
    }
    if let Ok(colex_home) = std::env::var("COLEX_HOME") {
        return Ok(PathBuf::from(colex_home));
    }
    home_dir()
        .map(|home| home.join(".colex"))
        .ok_or_else(|| ColexError::Config("home directory not found".to_string()))
}
