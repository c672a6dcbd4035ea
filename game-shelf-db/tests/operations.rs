use game_shelf_catalog::*;
use game_shelf_db::*;

fn seeded_db() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    seed_lookups(&conn, &Lookups::default()).unwrap();
    conn
}

fn lookup_id(conn: &rusqlite::Connection, kind: LookupKind, name: &str) -> i64 {
    conn.query_row(
        &format!("SELECT id FROM {} WHERE name = ?1", kind.table()),
        [name],
        |row| row.get(0),
    )
    .unwrap()
}

fn link_count(conn: &rusqlite::Connection, kind: LookupKind, game_id: i64) -> i64 {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {} WHERE game_id = ?1", kind.link_table()),
        [game_id],
        |row| row.get(0),
    )
    .unwrap()
}

fn sample_game(conn: &rusqlite::Connection) -> NewGame {
    NewGame {
        title: "Celeste".to_string(),
        start_date: "2023-01-01".to_string(),
        end_date: "2023-02-14".to_string(),
        completed: true,
        steam_store_url: "https://store.steampowered.com/app/504230".to_string(),
        gog_store_url: String::new(),
        image_url: String::new(),
        comments: "Strawberries!".to_string(),
        tags: "precision, indie".to_string(),
        developer: "Maddy Makes Games".to_string(),
        rating: 9,
        platform_ids: vec![
            lookup_id(conn, LookupKind::Platform, "PC"),
            lookup_id(conn, LookupKind::Platform, "Switch"),
        ],
        genre_ids: vec![lookup_id(conn, LookupKind::Genre, "Platformer")],
    }
}

// ── Seeding ─────────────────────────────────────────────────────────────────

#[test]
fn seed_creates_all_default_lookups() {
    let conn = open_memory().unwrap();
    let stats = seed_lookups(&conn, &Lookups::default()).unwrap();
    assert_eq!(stats.platforms_created, DEFAULT_PLATFORMS.len());
    assert_eq!(stats.genres_created, DEFAULT_GENRES.len());
}

#[test]
fn seed_is_idempotent() {
    let conn = open_memory().unwrap();
    seed_lookups(&conn, &Lookups::default()).unwrap();
    let second = seed_lookups(&conn, &Lookups::default()).unwrap();
    assert_eq!(second, SeedStats::default());

    let platforms: i64 = conn
        .query_row("SELECT COUNT(*) FROM platforms", [], |r| r.get(0))
        .unwrap();
    let genres: i64 = conn
        .query_row("SELECT COUNT(*) FROM genres", [], |r| r.get(0))
        .unwrap();
    assert_eq!(platforms as usize, DEFAULT_PLATFORMS.len());
    assert_eq!(genres as usize, DEFAULT_GENRES.len());
}

#[test]
fn seed_adds_only_missing_names() {
    let conn = seeded_db();
    let extra = Lookups {
        platforms: vec!["PC".to_string(), "Steam Deck".to_string()],
        genres: vec![],
    };
    let stats = seed_lookups(&conn, &extra).unwrap();
    assert_eq!(stats.platforms_created, 1);
    assert_eq!(stats.genres_created, 0);
}

// ── Create ──────────────────────────────────────────────────────────────────

#[test]
fn insert_creates_one_link_per_id() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    assert_eq!(link_count(&conn, LookupKind::Platform, id), 2);
    assert_eq!(link_count(&conn, LookupKind::Genre, id), 1);
}

#[test]
fn insert_without_links() {
    let conn = seeded_db();
    let id = insert_game(&conn, &NewGame::titled("Tetris")).unwrap();
    assert_eq!(link_count(&conn, LookupKind::Platform, id), 0);
    assert_eq!(link_count(&conn, LookupKind::Genre, id), 0);
}

#[test]
fn insert_ignores_unknown_and_repeated_ids() {
    let conn = seeded_db();
    let pc = lookup_id(&conn, LookupKind::Platform, "PC");
    let mut game = NewGame::titled("Doom");
    game.platform_ids = vec![pc, pc, 9999];
    game.genre_ids = vec![-1];

    let id = insert_game(&conn, &game).unwrap();
    assert_eq!(link_count(&conn, LookupKind::Platform, id), 1);
    assert_eq!(link_count(&conn, LookupKind::Genre, id), 0);
}

#[test]
fn insert_persists_fields() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    let record = get_game(&conn, id).unwrap().unwrap();
    assert_eq!(record.game.title, "Celeste");
    assert_eq!(record.game.end_date, "2023-02-14");
    assert!(record.game.completed);
    assert_eq!(record.game.developer, "Maddy Makes Games");
    assert_eq!(record.game.rating, 9);
    assert!(!record.game.created_at.is_empty());
}

// ── Update ──────────────────────────────────────────────────────────────────

#[test]
fn update_replaces_links_entirely() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    let ps5 = lookup_id(&conn, LookupKind::Platform, "PS5");
    let rpg = lookup_id(&conn, LookupKind::Genre, "RPG");
    let horror = lookup_id(&conn, LookupKind::Genre, "Horror");
    let mut changed = game.clone();
    changed.platform_ids = vec![ps5];
    changed.genre_ids = vec![rpg, horror];
    update_game(&conn, id, &changed).unwrap();

    let record = get_game(&conn, id).unwrap().unwrap();
    assert_eq!(record.platform_ids(), vec![ps5]);
    let mut genres = record.genre_ids();
    genres.sort();
    let mut expected = vec![rpg, horror];
    expected.sort();
    assert_eq!(genres, expected);
}

#[test]
fn repeated_updates_do_not_accumulate_links() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    for _ in 0..3 {
        update_game(&conn, id, &game).unwrap();
    }
    assert_eq!(link_count(&conn, LookupKind::Platform, id), 2);
    assert_eq!(link_count(&conn, LookupKind::Genre, id), 1);
}

#[test]
fn update_with_no_ids_clears_links() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    let mut cleared = game.clone();
    cleared.platform_ids.clear();
    cleared.genre_ids.clear();
    update_game(&conn, id, &cleared).unwrap();

    assert_eq!(link_count(&conn, LookupKind::Platform, id), 0);
    assert_eq!(link_count(&conn, LookupKind::Genre, id), 0);
}

#[test]
fn update_changes_fields() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    let mut changed = game.clone();
    changed.title = "Celeste: Farewell".to_string();
    changed.completed = false;
    changed.rating = 10;
    update_game(&conn, id, &changed).unwrap();

    let record = get_game(&conn, id).unwrap().unwrap();
    assert_eq!(record.game.title, "Celeste: Farewell");
    assert!(!record.game.completed);
    assert_eq!(record.game.rating, 10);
}

#[test]
fn update_missing_game_is_not_found() {
    let conn = seeded_db();
    let err = update_game(&conn, 42, &NewGame::titled("Ghost")).unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn update_of_other_game_leaves_links_alone() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let first = insert_game(&conn, &game).unwrap();
    let second = insert_game(&conn, &game).unwrap();

    update_game(&conn, second, &NewGame::titled("Bare")).unwrap();
    assert_eq!(link_count(&conn, LookupKind::Platform, first), 2);
    assert_eq!(link_count(&conn, LookupKind::Platform, second), 0);
}

// ── Delete ──────────────────────────────────────────────────────────────────

#[test]
fn delete_removes_game_and_links() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();

    delete_game(&conn, id).unwrap();
    assert!(get_game(&conn, id).unwrap().is_none());

    let orphans: i64 = conn
        .query_row(
            "SELECT (SELECT COUNT(*) FROM game_platforms WHERE game_id = ?1)
                  + (SELECT COUNT(*) FROM game_genres WHERE game_id = ?1)",
            [id],
            |r| r.get(0),
        )
        .unwrap();
    assert_eq!(orphans, 0);
}

#[test]
fn delete_keeps_lookup_rows() {
    let conn = seeded_db();
    let game = sample_game(&conn);
    let id = insert_game(&conn, &game).unwrap();
    delete_game(&conn, id).unwrap();

    let platforms = list_lookups(&conn, LookupKind::Platform).unwrap();
    assert_eq!(platforms.len(), DEFAULT_PLATFORMS.len());
}

#[test]
fn delete_missing_game_is_not_found() {
    let conn = seeded_db();
    let err = delete_game(&conn, 7).unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("game"));
}

// ── Links ───────────────────────────────────────────────────────────────────

#[test]
fn replace_links_reports_linked_count() {
    let conn = seeded_db();
    let id = insert_game(&conn, &NewGame::titled("Outer Wilds")).unwrap();
    let pc = lookup_id(&conn, LookupKind::Platform, "PC");
    let ps4 = lookup_id(&conn, LookupKind::Platform, "PS4");

    let linked = replace_links(&conn, id, LookupKind::Platform, &[pc, ps4, pc, 500]).unwrap();
    assert_eq!(linked, 2);
    assert_eq!(link_count(&conn, LookupKind::Platform, id), 2);
}

// ── Import log ──────────────────────────────────────────────────────────────

#[test]
fn import_log_round_trip() {
    let conn = open_memory().unwrap();
    let log = ImportLog {
        id: 0,
        source_name: "games.xml".to_string(),
        imported_at: "2024-05-01T10:00:00Z".to_string(),
        records_created: 12,
        records_skipped: 3,
    };
    let id = insert_import_log(&conn, &log).unwrap();
    assert!(id > 0);

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_name, "games.xml");
    assert_eq!(logs[0].records_created, 12);
    assert_eq!(logs[0].records_skipped, 3);
}
