use std::path::Path;

use crate::CliError;

/// Print the JSON form of an XML file to stdout.
pub(crate) fn run_xml_to_json(xml: &Path) -> Result<(), CliError> {
    let doc = game_shelf_import::xml_file_to_json(xml)
        .map_err(|e| CliError::import(format!("{}: {}", xml.display(), e)))?;
    let pretty = serde_json::to_string_pretty(&doc)
        .map_err(|e| CliError::import(e.to_string()))?;
    println!("{}", pretty);
    Ok(())
}
