pub(crate) mod import;
pub(crate) mod seed;
pub(crate) mod serve;
pub(crate) mod stats;
pub(crate) mod xml_to_json;

use std::path::Path;

use game_shelf_catalog::Lookups;
use rusqlite::Connection;

use crate::CliError;

/// Open (or create) the game database.
pub(crate) fn open_db(db_path: &Path) -> Result<Connection, CliError> {
    game_shelf_db::open_database(db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open database at {}: {}",
            db_path.display(),
            e
        ))
    })
}

/// Lookup lists from the given YAML file, or the built-in defaults.
pub(crate) fn load_lookups(path: Option<&Path>) -> Result<Lookups, CliError> {
    match path {
        Some(p) => {
            let lookups = game_shelf_catalog::load_lookups(p)
                .map_err(|e| CliError::config(e.to_string()))?;
            log::debug!("Loaded lookup lists from {}", p.display());
            Ok(lookups)
        }
        None => Ok(Lookups::default()),
    }
}
