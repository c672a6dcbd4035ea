//! SQLite persistence layer for the game shelf.
//!
//! Provides schema creation, CRUD operations with link management, lookup
//! seeding, and query APIs backed by SQLite (via rusqlite with bundled
//! feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    OperationError, SeedStats, add_game, delete_game, insert_game, insert_import_log, replace_links,
    seed_lookups, update_game,
};
pub use queries::{
    CatalogStats, catalog_stats, find_game_by_title, get_game, linked_lookups, list_games,
    list_import_logs, list_lookups,
};
pub use schema::{SchemaError, open_database, open_memory};
