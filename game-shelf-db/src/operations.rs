//! Write operations: games, their lookup links, seeding and import logs.

use game_shelf_catalog::{ImportLog, LookupKind, Lookups, NewGame};
use rusqlite::{Connection, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

impl OperationError {
    pub fn game_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "game".to_string(),
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Game Operations ─────────────────────────────────────────────────────────

/// Insert a new game and link it to the requested platforms and genres.
///
/// Runs in its own transaction. Returns the generated game id.
pub fn insert_game(conn: &Connection, game: &NewGame) -> Result<i64, OperationError> {
    let tx = conn.unchecked_transaction()?;
    let id = add_game(&tx, game)?;
    for kind in LookupKind::ALL {
        replace_links(&tx, id, kind, game.link_ids(kind))?;
    }
    tx.commit()?;
    log::debug!("Inserted game {} ({})", id, game.title);
    Ok(id)
}

/// Insert the game row only, without links.
///
/// Does not open a transaction, so it can run inside a caller's batch.
pub fn add_game(conn: &Connection, game: &NewGame) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO games (title, start_date, end_date, completed, steam_store_url,
             gog_store_url, image_url, comments, tags, developer, rating)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            game.title,
            game.start_date,
            game.end_date,
            game.completed,
            game.steam_store_url,
            game.gog_store_url,
            game.image_url,
            game.comments,
            game.tags,
            game.developer,
            game.rating,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Overwrite every editable field of a game and replace both link sets.
pub fn update_game(conn: &Connection, id: i64, game: &NewGame) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    let changed = tx.execute(
        "UPDATE games SET
             title = ?2,
             start_date = ?3,
             end_date = ?4,
             completed = ?5,
             steam_store_url = ?6,
             gog_store_url = ?7,
             image_url = ?8,
             comments = ?9,
             tags = ?10,
             developer = ?11,
             rating = ?12,
             updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            game.title,
            game.start_date,
            game.end_date,
            game.completed,
            game.steam_store_url,
            game.gog_store_url,
            game.image_url,
            game.comments,
            game.tags,
            game.developer,
            game.rating,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::game_not_found(id));
    }

    for kind in LookupKind::ALL {
        replace_links(&tx, id, kind, game.link_ids(kind))?;
    }
    tx.commit()?;
    log::debug!("Updated game {} ({})", id, game.title);
    Ok(())
}

/// Delete a game. Its links are removed first, then the game row.
pub fn delete_game(conn: &Connection, id: i64) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    let exists: bool = tx.query_row(
        "SELECT EXISTS(SELECT 1 FROM games WHERE id = ?1)",
        params![id],
        |row| row.get(0),
    )?;
    if !exists {
        return Err(OperationError::game_not_found(id));
    }

    for kind in LookupKind::ALL {
        tx.execute(
            &format!("DELETE FROM {} WHERE game_id = ?1", kind.link_table()),
            params![id],
        )?;
    }
    tx.execute("DELETE FROM games WHERE id = ?1", params![id])?;
    tx.commit()?;
    log::debug!("Deleted game {}", id);
    Ok(())
}

// ── Link Operations ─────────────────────────────────────────────────────────

/// Replace all of a game's links of one kind with `ids`.
///
/// Existing links are deleted, then one link is inserted per distinct id that
/// exists in the lookup table. Unknown ids are skipped. Returns the number of
/// links now present. Does not open a transaction.
pub fn replace_links(
    conn: &Connection,
    game_id: i64,
    kind: LookupKind,
    ids: &[i64],
) -> Result<usize, OperationError> {
    conn.execute(
        &format!("DELETE FROM {} WHERE game_id = ?1", kind.link_table()),
        params![game_id],
    )?;

    let mut stmt = conn.prepare(&format!(
        "INSERT OR IGNORE INTO {link} (game_id, {col})
         SELECT ?1, id FROM {table} WHERE id = ?2",
        link = kind.link_table(),
        col = kind.link_column(),
        table = kind.table(),
    ))?;

    let mut linked = 0;
    for id in ids {
        let inserted = stmt.execute(params![game_id, id])?;
        if inserted == 0 {
            log::debug!("Skipping {} id {} for game {}", kind, id, game_id);
        }
        linked += inserted;
    }
    Ok(linked)
}

// ── Seed Loading ────────────────────────────────────────────────────────────

/// Insert any lookup names that are not yet present.
///
/// Safe to call repeatedly: existing names are left untouched, so a second
/// run creates nothing.
pub fn seed_lookups(conn: &Connection, lookups: &Lookups) -> Result<SeedStats, OperationError> {
    let lookups = lookups.normalized();
    let mut stats = SeedStats::default();

    let tx = conn.unchecked_transaction()?;
    for kind in LookupKind::ALL {
        let names = match kind {
            LookupKind::Platform => &lookups.platforms,
            LookupKind::Genre => &lookups.genres,
        };
        let mut stmt = tx.prepare(&format!(
            "INSERT OR IGNORE INTO {} (name) VALUES (?1)",
            kind.table()
        ))?;
        for name in names {
            if stmt.execute(params![name])? > 0 {
                log::info!("Creating {}: {}", kind, name);
                match kind {
                    LookupKind::Platform => stats.platforms_created += 1,
                    LookupKind::Genre => stats.genres_created += 1,
                }
            }
        }
    }
    tx.commit()?;

    log::info!("Lookup tables initialized");
    Ok(stats)
}

/// Statistics from seeding the lookup tables.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedStats {
    pub platforms_created: usize,
    pub genres_created: usize,
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry. Returns the generated ID.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source_name, imported_at, records_created, records_skipped)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            log.source_name,
            log.imported_at,
            log.records_created,
            log.records_skipped,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
