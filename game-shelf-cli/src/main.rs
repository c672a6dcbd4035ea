//! game-shelf CLI
//!
//! Runs the web interface and the maintenance commands for a personal
//! video game catalog.

mod cli_types;
mod commands;
mod error;
mod logging;
mod settings;

use clap::Parser;

use cli_types::{Cli, Commands};
pub(crate) use error::CliError;
use settings::Settings;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = logging::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let settings = Settings::load()?;
    let db_path = settings.resolve_db_path(cli.db);
    let lookups_path = settings.resolve_lookups_path(cli.lookups);

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run_serve(
            &db_path,
            lookups_path.as_deref(),
            &settings.resolve_host(host),
            settings.resolve_port(port),
        ),
        Commands::Seed => commands::seed::run_seed(&db_path, lookups_path.as_deref()),
        Commands::Import { xml, json_out } => {
            commands::import::run_import(&db_path, &xml, json_out)
        }
        Commands::XmlToJson { xml } => commands::xml_to_json::run_xml_to_json(&xml),
        Commands::Stats => commands::stats::run_stats(&db_path),
    }
}

/// Print an empty line through the logger.
pub(crate) fn log_blank() {
    log::info!("");
}
