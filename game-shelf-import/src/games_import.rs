//! Insert imported catalog entries as new games.
//!
//! Only the title, Steam store link and logo are carried over. Everything
//! else starts empty and the game has no platform or genre links.

use std::collections::HashSet;
use std::path::Path;

use game_shelf_catalog::{ImportLog, NewGame};
use game_shelf_db::{add_game, find_game_by_title, insert_import_log};
use rusqlite::Connection;
use serde_json::Value;

use crate::error::ImportError;
use crate::progress::{EntryOutcome, ImportProgress};
use crate::xml::{ImportedGame, games_from_document, xml_file_to_json};

/// Statistics from a single catalog import.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub total: usize,
    pub created: usize,
    pub skipped: usize,
}

/// Result of importing an XML file: the counts plus the converted document.
#[derive(Debug)]
pub struct XmlImport {
    pub stats: ImportStats,
    pub document: Value,
}

/// Import catalog entries into the database.
///
/// Runs in one transaction. An entry whose title already exists, either in
/// the database or earlier in the same batch, is skipped. An import log row
/// is written under `source_name`.
pub fn import_games(
    conn: &Connection,
    games: &[ImportedGame],
    source_name: &str,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats {
        total: games.len(),
        ..Default::default()
    };
    let mut seen: HashSet<&str> = HashSet::new();

    let tx = conn.unchecked_transaction()?;

    for (i, entry) in games.iter().enumerate() {
        let title = entry.name.trim();
        let outcome = if !seen.insert(title) || find_game_by_title(&tx, title)?.is_some() {
            stats.skipped += 1;
            EntryOutcome::Duplicate
        } else {
            add_game(&tx, &new_game_from(entry))?;
            stats.created += 1;
            EntryOutcome::Created
        };

        if let Some(p) = progress {
            p.on_entry(i + 1, games.len(), title, outcome);
        }
    }

    insert_import_log(
        &tx,
        &ImportLog {
            id: 0,
            source_name: source_name.to_string(),
            imported_at: chrono::Utc::now().to_rfc3339(),
            records_created: stats.created as i64,
            records_skipped: stats.skipped as i64,
        },
    )?;

    tx.commit()?;

    if let Some(p) = progress {
        p.on_complete(&format!(
            "Imported {} of {} games from {} ({} skipped)",
            stats.created, stats.total, source_name, stats.skipped
        ));
    }

    Ok(stats)
}

/// Convert an XML catalog file and import its games.
///
/// The file name is recorded as the import source. The converted JSON
/// document is handed back so callers can keep a copy.
pub fn import_xml_file(
    conn: &Connection,
    path: &Path,
    progress: Option<&dyn ImportProgress>,
) -> Result<XmlImport, ImportError> {
    if let Some(p) = progress {
        p.on_phase(&format!("Importing {}", path.display()));
    }
    let document = xml_file_to_json(path)?;
    let games = games_from_document(&document)?;
    let stats = import_games(conn, &games, &source_name(path), progress)?;
    Ok(XmlImport { stats, document })
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn new_game_from(entry: &ImportedGame) -> NewGame {
    NewGame {
        steam_store_url: entry.store_link.clone(),
        image_url: entry.logo.clone(),
        ..NewGame::titled(entry.name.trim())
    }
}
