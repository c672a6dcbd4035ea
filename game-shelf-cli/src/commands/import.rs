use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use game_shelf_import::{LogProgress, import_xml_file};

use crate::CliError;

use super::open_db;

/// Convert an XML catalog and import its games.
pub(crate) fn run_import(
    db_path: &Path,
    xml: &Path,
    json_out: Option<PathBuf>,
) -> Result<(), CliError> {
    let conn = open_db(db_path)?;

    let imported = import_xml_file(&conn, xml, Some(&LogProgress))
        .map_err(|e| CliError::import(format!("{}: {}", xml.display(), e)))?;

    if let Some(out) = json_out {
        let pretty = serde_json::to_string_pretty(&imported.document)
            .map_err(|e| CliError::import(e.to_string()))?;
        std::fs::write(&out, pretty)?;
        log::info!("  Wrote JSON to {}", out.display());
    }

    crate::log_blank();
    log::info!(
        "{} Imported {} new games ({} already present)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        imported.stats.created,
        imported.stats.skipped,
    );
    Ok(())
}
