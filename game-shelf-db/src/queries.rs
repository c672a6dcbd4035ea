//! Read queries for the game database.
//!
//! Provides single-game lookup, filtered listing, lookup lists, and
//! statistics.

use game_shelf_catalog::*;
use rusqlite::{Connection, params};

use crate::operations::OperationError;

const GAME_COLUMNS: &str = "id, title, start_date, end_date, completed, steam_store_url,
        gog_store_url, image_url, comments, tags, developer, rating,
        created_at, updated_at";

// ── Game Lookups ────────────────────────────────────────────────────────────

/// Fetch one game with its linked platforms and genres.
pub fn get_game(conn: &Connection, id: i64) -> Result<Option<GameRecord>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT {GAME_COLUMNS} FROM games WHERE id = ?1"))?;
    let game = match stmt.query_row(params![id], row_to_game) {
        Ok(g) => g,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    Ok(Some(GameRecord {
        platforms: linked_lookups(conn, LookupKind::Platform, game.id)?,
        genres: linked_lookups(conn, LookupKind::Genre, game.id)?,
        game,
    }))
}

/// Find a game id by exact title.
pub fn find_game_by_title(conn: &Connection, title: &str) -> Result<Option<i64>, OperationError> {
    let mut stmt = conn.prepare("SELECT id FROM games WHERE title = ?1 LIMIT 1")?;
    let result = stmt.query_row(params![title], |row| row.get::<_, i64>(0));
    match result {
        Ok(id) => Ok(Some(id)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List games matching `filter`, ordered by id, with linked lookup names.
pub fn list_games(conn: &Connection, filter: &GameFilter) -> Result<Vec<GameSummary>, OperationError> {
    let mut sql = format!("SELECT {GAME_COLUMNS} FROM games");
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if !filter.is_empty() {
        let mut clauses: Vec<&str> = Vec::new();
        if let Some(term) = filter.title_term() {
            clauses.push("title LIKE ? ESCAPE '\\'");
            param_values.push(Box::new(format!("%{}%", escape_like(term))));
        }
        if filter.completed_only {
            clauses.push("completed = 1");
        }
        if let Some(min) = filter.rating_floor() {
            clauses.push("rating >= ?");
            param_values.push(Box::new(min));
        }
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    sql.push_str(" ORDER BY id");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::types::ToSql> = param_values.iter().map(|v| v.as_ref()).collect();
    let games = stmt
        .query_map(params.as_slice(), row_to_game)?
        .collect::<Result<Vec<_>, _>>()?;

    games
        .into_iter()
        .map(|game| {
            let platforms = linked_lookups(conn, LookupKind::Platform, game.id)?;
            let genres = linked_lookups(conn, LookupKind::Genre, game.id)?;
            Ok(GameSummary {
                game,
                platforms: platforms.into_iter().map(|p| p.name).collect(),
                genres: genres.into_iter().map(|g| g.name).collect(),
            })
        })
        .collect()
}

/// Lookups of one kind linked to a game, ordered by name.
pub fn linked_lookups(
    conn: &Connection,
    kind: LookupKind,
    game_id: i64,
) -> Result<Vec<Lookup>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT l.id, l.name FROM {table} l
         JOIN {link} k ON k.{col} = l.id
         WHERE k.game_id = ?1 ORDER BY l.name",
        table = kind.table(),
        link = kind.link_table(),
        col = kind.link_column(),
    ))?;
    let rows = stmt.query_map(params![game_id], row_to_lookup)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Lookup Queries ──────────────────────────────────────────────────────────

/// List every row of a lookup table, ordered by id.
pub fn list_lookups(conn: &Connection, kind: LookupKind) -> Result<Vec<Lookup>, OperationError> {
    let mut stmt = conn.prepare(&format!("SELECT id, name FROM {} ORDER BY id", kind.table()))?;
    let rows = stmt.query_map([], row_to_lookup)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get overall catalog statistics.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let games: i64 = conn.query_row("SELECT COUNT(*) FROM games", [], |r| r.get(0))?;
    let completed: i64 = conn.query_row(
        "SELECT COUNT(*) FROM games WHERE completed = 1",
        [],
        |r| r.get(0),
    )?;
    let platforms: i64 = conn.query_row("SELECT COUNT(*) FROM platforms", [], |r| r.get(0))?;
    let genres: i64 = conn.query_row("SELECT COUNT(*) FROM genres", [], |r| r.get(0))?;
    let platform_links: i64 =
        conn.query_row("SELECT COUNT(*) FROM game_platforms", [], |r| r.get(0))?;
    let genre_links: i64 = conn.query_row("SELECT COUNT(*) FROM game_genres", [], |r| r.get(0))?;

    Ok(CatalogStats {
        games,
        completed,
        platforms,
        genres,
        platform_links,
        genre_links,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug)]
pub struct CatalogStats {
    pub games: i64,
    pub completed: i64,
    pub platforms: i64,
    pub genres: i64,
    pub platform_links: i64,
    pub genre_links: i64,
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs, newest first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source_name, imported_at, records_created, records_skipped
         FROM import_log ORDER BY id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source_name: row.get(1)?,
            imported_at: row.get(2)?,
            records_created: row.get(3)?,
            records_skipped: row.get(4)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_game(row: &rusqlite::Row<'_>) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        title: row.get(1)?,
        start_date: row.get(2)?,
        end_date: row.get(3)?,
        completed: row.get(4)?,
        steam_store_url: row.get(5)?,
        gog_store_url: row.get(6)?,
        image_url: row.get(7)?,
        comments: row.get(8)?,
        tags: row.get(9)?,
        developer: row.get(10)?,
        rating: row.get(11)?,
        created_at: row.get(12)?,
        updated_at: row.get(13)?,
    })
}

fn row_to_lookup(row: &rusqlite::Row<'_>) -> rusqlite::Result<Lookup> {
    Ok(Lookup {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
