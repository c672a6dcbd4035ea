//! Import game catalogs exported as XML into the shelf database.
//!
//! The XML is first converted into a generic JSON document, then the
//! `gamesList/games/game` entries are pulled out and inserted as new games.

pub mod error;
pub mod games_import;
pub mod progress;
pub mod xml;

pub use error::ImportError;
pub use games_import::{ImportStats, XmlImport, import_games, import_xml_file};
pub use progress::{EntryOutcome, ImportProgress, LogProgress, SilentProgress};
pub use xml::{ImportedGame, games_from_document, xml_file_to_json, xml_to_json};
