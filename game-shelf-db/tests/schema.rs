use game_shelf_db::open_memory;
use game_shelf_db::schema::{CURRENT_VERSION, SchemaError, create_schema, get_schema_version};
use tempfile::TempDir;

#[test]
fn create_schema_in_memory() {
    let conn = open_memory().unwrap();
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn schema_is_idempotent() {
    let conn = open_memory().unwrap();
    create_schema(&conn).unwrap();
    create_schema(&conn).unwrap();

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn foreign_keys_enabled() {
    let conn = open_memory().unwrap();
    let fk: i32 = conn
        .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
        .unwrap();
    assert_eq!(fk, 1);
}

#[test]
fn all_tables_exist() {
    let conn = open_memory().unwrap();
    let tables = [
        "schema_version",
        "platforms",
        "genres",
        "games",
        "game_platforms",
        "game_genres",
        "import_log",
    ];
    for table in tables {
        let exists: bool = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1)",
                [table],
                |row| row.get(0),
            )
            .unwrap();
        assert!(exists, "table '{}' should exist", table);
    }
}

#[test]
fn lookup_names_are_unique() {
    let conn = open_memory().unwrap();
    conn.execute("INSERT INTO platforms (name) VALUES ('PC')", [])
        .unwrap();
    let dup = conn.execute("INSERT INTO platforms (name) VALUES ('PC')", []);
    assert!(dup.is_err());
}

#[test]
fn links_require_existing_rows() {
    let conn = open_memory().unwrap();
    let orphan = conn.execute(
        "INSERT INTO game_platforms (game_id, platform_id) VALUES (1, 1)",
        [],
    );
    assert!(orphan.is_err());
}

#[test]
fn open_database_on_disk_reopens() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.db");

    {
        let conn = game_shelf_db::open_database(&path).unwrap();
        conn.execute("INSERT INTO genres (name) VALUES ('RPG')", [])
            .unwrap();
    }

    let conn = game_shelf_db::open_database(&path).unwrap();
    let count: i64 = conn
        .query_row("SELECT COUNT(*) FROM genres", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(get_schema_version(&conn).unwrap(), CURRENT_VERSION);
}

#[test]
fn newer_schema_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("games.db");

    {
        let conn = game_shelf_db::open_database(&path).unwrap();
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [CURRENT_VERSION + 1],
        )
        .unwrap();
    }

    match game_shelf_db::open_database(&path) {
        Err(SchemaError::VersionMismatch { expected, found }) => {
            assert_eq!(expected, CURRENT_VERSION);
            assert_eq!(found, CURRENT_VERSION + 1);
        }
        other => panic!("expected version mismatch, got {:?}", other.map(|_| ())),
    }
}
