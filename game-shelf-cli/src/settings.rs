//! Settings file and value resolution.
//!
//! Every value is resolved through the same priority chain:
//!
//! 1. CLI flag, or its environment variable (clap reads both)
//! 2. `~/.config/game-shelf/settings.toml`
//! 3. Built-in default

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::CliError;

pub(crate) const DEFAULT_HOST: &str = "127.0.0.1";
pub(crate) const DEFAULT_PORT: u16 = 8000;
pub(crate) const DEFAULT_DB: &str = "games.db";

/// Canonical path to the settings file: `~/.config/game-shelf/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("game-shelf").join("settings.toml")
}

/// Contents of `settings.toml`. Every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    server: ServerSettings,
    database: DatabaseSettings,
    lookups: LookupSettings,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ServerSettings {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DatabaseSettings {
    path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LookupSettings {
    path: Option<PathBuf>,
}

impl Settings {
    /// Load the settings file. A missing file yields empty settings.
    pub(crate) fn load() -> Result<Self, CliError> {
        Self::load_from(&settings_path())
    }

    pub(crate) fn load_from(path: &Path) -> Result<Self, CliError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No settings file at {}", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        Self::parse(&contents)
            .map_err(|e| CliError::config(format!("{}: {}", path.display(), e)))
    }

    fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub(crate) fn resolve_db_path(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.database.path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB))
    }

    /// Lookup YAML file, if any. `None` means the built-in lists.
    pub(crate) fn resolve_lookups_path(&self, cli_override: Option<PathBuf>) -> Option<PathBuf> {
        cli_override.or_else(|| self.lookups.path.clone())
    }

    pub(crate) fn resolve_host(&self, cli_override: Option<String>) -> String {
        cli_override
            .or_else(|| self.server.host.clone())
            .unwrap_or_else(|| DEFAULT_HOST.to_string())
    }

    pub(crate) fn resolve_port(&self, cli_override: Option<u16>) -> u16 {
        cli_override.or(self.server.port).unwrap_or(DEFAULT_PORT)
    }
}
