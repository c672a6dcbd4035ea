use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{load_lookups, open_db};

/// Create the database if needed and fill the lookup tables.
pub(crate) fn run_seed(db_path: &Path, lookups_path: Option<&Path>) -> Result<(), CliError> {
    let lookups = load_lookups(lookups_path)?;
    let conn = open_db(db_path)?;

    let stats = game_shelf_db::seed_lookups(&conn, &lookups)
        .map_err(|e| CliError::database(format!("Failed to seed lookup tables: {}", e)))?;

    log::info!(
        "{} Seeded {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        db_path.display(),
    );
    log::info!(
        "  Platforms: {} new of {}",
        stats.platforms_created,
        lookups.platforms.len()
    );
    log::info!(
        "  Genres:    {} new of {}",
        stats.genres_created,
        lookups.genres.len()
    );
    Ok(())
}
