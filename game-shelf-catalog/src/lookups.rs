//! Platform and genre lookup lists.
//!
//! The shelf ships with a built-in set of names. A YAML file with
//! `platforms:` and `genres:` sequences can replace either list.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
}

pub const DEFAULT_PLATFORMS: &[&str] = &[
    "PC",
    "PS4",
    "PS5",
    "Xbox One",
    "Xbox Series X",
    "Switch",
    "Mobile",
];

pub const DEFAULT_GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "RPG",
    "Strategy",
    "Simulation",
    "Sports",
    "Puzzle",
    "Racing",
    "Fighting",
    "Horror",
    "Survival",
    "Shooter",
    "Platformer",
    "MMO",
    "MOBA",
    "RTS",
    "TBS",
    "TPS",
    "FPS",
    "Sandbox",
    "Open World",
    "Fantasy",
    "Sci-Fi",
    "Historical",
    "Medieval",
    "Modern",
    "Post-Apocalyptic",
];

/// The names to seed into the platform and genre tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookups {
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,
    #[serde(default = "default_genres")]
    pub genres: Vec<String>,
}

fn default_platforms() -> Vec<String> {
    DEFAULT_PLATFORMS.iter().map(|s| s.to_string()).collect()
}

fn default_genres() -> Vec<String> {
    DEFAULT_GENRES.iter().map(|s| s.to_string()).collect()
}

impl Default for Lookups {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            genres: default_genres(),
        }
    }
}

impl Lookups {
    /// Trim names and drop blanks and duplicates. First occurrence wins.
    pub fn normalized(&self) -> Self {
        Self {
            platforms: normalize_names(&self.platforms),
            genres: normalize_names(&self.genres),
        }
    }
}

fn normalize_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(n.to_string()))
        .map(str::to_string)
        .collect()
}

/// Load lookup lists from a YAML file.
///
/// A list missing from the file falls back to the built-in defaults.
pub fn load_lookups(path: &Path) -> Result<Lookups, LookupError> {
    let contents = std::fs::read_to_string(path).map_err(|e| LookupError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let lookups: Lookups = serde_yml::from_str(&contents).map_err(|e| LookupError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(lookups.normalized())
}
