use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::open_db;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    if !db_path.exists() {
        log::warn!("No game database found at {}", db_path.display());
        log::info!("Run 'game-shelf seed' to create one.");
        return Ok(());
    }

    let conn = open_db(db_path)?;

    let stats = game_shelf_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query stats: {}", e)))?;

    log::info!(
        "{}",
        "Game Shelf Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Games:           {:>8}", stats.games);
    log::info!("  Completed:       {:>8}", stats.completed);
    log::info!("  Platforms:       {:>8}", stats.platforms);
    log::info!("  Genres:          {:>8}", stats.genres);
    log::info!("  Platform links:  {:>8}", stats.platform_links);
    log::info!("  Genre links:     {:>8}", stats.genre_links);

    let logs = game_shelf_db::list_import_logs(&conn, Some(5))
        .map_err(|e| CliError::database(format!("Failed to query import log: {}", e)))?;
    if !logs.is_empty() {
        crate::log_blank();
        log::info!(
            "{}",
            "Recent imports".if_supports_color(Stdout, |t| t.bold()),
        );
        for entry in logs {
            log::info!(
                "  {}  {}  +{} / {} skipped",
                entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
                entry.source_name,
                entry.records_created,
                entry.records_skipped,
            );
        }
    }

    Ok(())
}
