//! CLI type definitions: command enum and global arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "game-shelf")]
#[command(about = "Track the video games you own, play and finish", long_about = None)]
pub(crate) struct Cli {
    /// SQLite database file (default: games.db)
    #[arg(long, global = true, env = "GAME_SHELF_DB")]
    pub db: Option<PathBuf>,

    /// YAML file replacing the built-in platform and genre lists
    #[arg(long, global = true)]
    pub lookups: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write debug-level log output to a file (ANSI codes stripped)
    #[arg(long, global = true, env = "GAME_SHELF_LOGFILE")]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Run the web interface
    Serve {
        /// Address to bind (default: 127.0.0.1)
        #[arg(long, env = "GAME_SHELF_HOST")]
        host: Option<String>,

        /// Port to listen on (default: 8000)
        #[arg(short, long, env = "GAME_SHELF_PORT")]
        port: Option<u16>,
    },

    /// Create the database and fill the platform and genre tables
    Seed,

    /// Import games from an XML catalog export
    Import {
        /// XML file with a gamesList/games/game layout
        xml: PathBuf,

        /// Also write the intermediate JSON document to this path
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// Convert an XML file to JSON and print it
    XmlToJson {
        /// XML file to convert
        xml: PathBuf,
    },

    /// Show catalog statistics and recent imports
    Stats,
}
