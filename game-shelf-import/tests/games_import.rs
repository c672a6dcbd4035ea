use std::cell::RefCell;
use std::io::Write;

use game_shelf_catalog::{GameFilter, NewGame};
use game_shelf_db::{get_game, insert_game, list_games, list_import_logs, open_memory};
use game_shelf_import::*;

fn entry(name: &str, store_link: &str, logo: &str) -> ImportedGame {
    ImportedGame {
        name: name.to_string(),
        store_link: store_link.to_string(),
        logo: logo.to_string(),
    }
}

const CATALOG_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gamesList>
    <games>
        <game>
            <name>Hades</name>
            <storeLink>https://store.steampowered.com/app/1145360</storeLink>
            <logo>https://cdn.example.com/hades.png</logo>
        </game>
        <game>
            <name>Outer Wilds</name>
            <storeLink>https://store.steampowered.com/app/753640</storeLink>
            <logo>https://cdn.example.com/outer-wilds.png</logo>
        </game>
    </games>
</gamesList>"#;

#[derive(Default)]
struct RecordingProgress {
    entries: RefCell<Vec<(usize, usize, String, EntryOutcome)>>,
    phases: RefCell<Vec<String>>,
    completed: RefCell<Vec<String>>,
}

impl ImportProgress for RecordingProgress {
    fn on_entry(&self, current: usize, total: usize, title: &str, outcome: EntryOutcome) {
        self.entries
            .borrow_mut()
            .push((current, total, title.to_string(), outcome));
    }

    fn on_phase(&self, message: &str) {
        self.phases.borrow_mut().push(message.to_string());
    }

    fn on_complete(&self, message: &str) {
        self.completed.borrow_mut().push(message.to_string());
    }
}

#[test]
fn import_maps_fields_and_leaves_rest_empty() {
    let conn = open_memory().unwrap();
    let games = [entry("Hades", "https://steam/hades", "https://img/hades.png")];

    let stats = import_games(&conn, &games, "games.xml", None).unwrap();
    assert_eq!(
        stats,
        ImportStats {
            total: 1,
            created: 1,
            skipped: 0
        }
    );

    let listed = list_games(&conn, &GameFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    let record = get_game(&conn, listed[0].game.id).unwrap().unwrap();
    assert_eq!(record.game.title, "Hades");
    assert_eq!(record.game.steam_store_url, "https://steam/hades");
    assert_eq!(record.game.image_url, "https://img/hades.png");
    assert_eq!(record.game.gog_store_url, "");
    assert_eq!(record.game.start_date, "");
    assert!(!record.game.completed);
    assert_eq!(record.game.rating, 0);
    assert!(record.platforms.is_empty());
    assert!(record.genres.is_empty());
}

#[test]
fn import_skips_existing_titles() {
    let conn = open_memory().unwrap();
    insert_game(&conn, &NewGame::titled("Hades")).unwrap();

    let games = [entry("Hades", "", ""), entry("Celeste", "", "")];
    let stats = import_games(&conn, &games, "games.xml", None).unwrap();

    assert_eq!(stats.created, 1);
    assert_eq!(stats.skipped, 1);
    assert_eq!(list_games(&conn, &GameFilter::default()).unwrap().len(), 2);
}

#[test]
fn import_skips_duplicates_within_batch() {
    let conn = open_memory().unwrap();
    let games = [
        entry("Celeste", "first", ""),
        entry("Celeste", "second", ""),
    ];

    let stats = import_games(&conn, &games, "games.xml", None).unwrap();
    assert_eq!(stats.created, 1);
    assert_eq!(stats.skipped, 1);

    let listed = list_games(&conn, &GameFilter::default()).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].game.steam_store_url, "first");
}

#[test]
fn import_is_idempotent() {
    let conn = open_memory().unwrap();
    let games = [entry("Hades", "", ""), entry("Celeste", "", "")];

    import_games(&conn, &games, "games.xml", None).unwrap();
    let second = import_games(&conn, &games, "games.xml", None).unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);
    assert_eq!(list_games(&conn, &GameFilter::default()).unwrap().len(), 2);
}

#[test]
fn import_writes_log_entry() {
    let conn = open_memory().unwrap();
    let games = [entry("Hades", "", ""), entry("Hades", "", "")];
    import_games(&conn, &games, "backlog.xml", None).unwrap();

    let logs = list_import_logs(&conn, None).unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].source_name, "backlog.xml");
    assert_eq!(logs[0].records_created, 1);
    assert_eq!(logs[0].records_skipped, 1);
    assert!(!logs[0].imported_at.is_empty());
}

#[test]
fn import_reports_progress() {
    let conn = open_memory().unwrap();
    insert_game(&conn, &NewGame::titled("Celeste")).unwrap();
    let games = [entry("Hades", "", ""), entry("Celeste", "", "")];
    let progress = RecordingProgress::default();

    import_games(&conn, &games, "games.xml", Some(&progress)).unwrap();

    assert_eq!(
        *progress.entries.borrow(),
        vec![
            (1, 2, "Hades".to_string(), EntryOutcome::Created),
            (2, 2, "Celeste".to_string(), EntryOutcome::Duplicate)
        ]
    );
    assert_eq!(progress.completed.borrow().len(), 1);
}

#[test]
fn import_xml_file_end_to_end() {
    let conn = open_memory().unwrap();
    let mut file = tempfile::Builder::new().suffix(".xml").tempfile().unwrap();
    file.write_all(CATALOG_XML.as_bytes()).unwrap();
    let progress = RecordingProgress::default();

    let imported = import_xml_file(&conn, file.path(), Some(&progress)).unwrap();
    assert_eq!(imported.stats.created, 2);
    assert_eq!(
        imported.document["gamesList"]["games"]["game"][1]["name"],
        "Outer Wilds"
    );
    assert_eq!(progress.phases.borrow().len(), 1);

    let listed = list_games(&conn, &GameFilter::default()).unwrap();
    let titles: Vec<&str> = listed.iter().map(|g| g.game.title.as_str()).collect();
    assert_eq!(titles, vec!["Hades", "Outer Wilds"]);

    let logs = list_import_logs(&conn, None).unwrap();
    let expected_source = file.path().file_name().unwrap().to_string_lossy();
    assert_eq!(logs[0].source_name, expected_source);
}

#[test]
fn import_xml_file_rejects_wrong_layout() {
    let conn = open_memory().unwrap();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<library><item/></library>").unwrap();

    let err = import_xml_file(&conn, file.path(), None).unwrap_err();
    assert!(matches!(err, ImportError::InvalidCatalog(_)));
    assert!(list_import_logs(&conn, None).unwrap().is_empty());
}

#[test]
fn import_xml_file_missing_path_is_io_error() {
    let conn = open_memory().unwrap();
    let err = import_xml_file(&conn, std::path::Path::new("/nonexistent/games.xml"), None)
        .unwrap_err();
    assert!(matches!(err, ImportError::Io(_)));
}
