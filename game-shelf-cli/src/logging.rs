//! Logger setup.
//!
//! Console output goes to stderr through `env_logger`: info by default, warn
//! with `--quiet`, debug with timestamps under `--verbose`, and `RUST_LOG`
//! applied on top. With `--logfile`, every record at debug level or above is
//! also appended to that file with timestamps and without color codes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::{LevelFilter, Log, Metadata, Record};

use crate::CliError;

/// Console logger plus an optional file logger.
pub(crate) struct ShelfLogger {
    console: env_logger::Logger,
    file: Option<env_logger::Logger>,
}

impl ShelfLogger {
    pub(crate) fn build(
        quiet: bool,
        verbose: bool,
        logfile: Option<&Path>,
    ) -> Result<Self, CliError> {
        let file = logfile.map(file_logger).transpose()?;
        Ok(Self {
            console: console_logger(quiet, verbose),
            file,
        })
    }

    /// Most verbose level any sink accepts.
    pub(crate) fn max_level(&self) -> LevelFilter {
        let file = self.file.as_ref().map_or(LevelFilter::Off, |f| f.filter());
        self.console.filter().max(file)
    }
}

impl Log for ShelfLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.console.enabled(metadata) || self.file.as_ref().is_some_and(|f| f.enabled(metadata))
    }

    fn log(&self, record: &Record<'_>) {
        self.console.log(record);
        if let Some(file) = &self.file {
            file.log(record);
        }
    }

    fn flush(&self) {
        self.console.flush();
        if let Some(file) = &self.file {
            file.flush();
        }
    }
}

/// Install the logger globally.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> Result<(), CliError> {
    let logger = ShelfLogger::build(quiet, verbose, logfile)?;
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger))
        .map_err(|e| CliError::config(format!("Failed to install logger: {}", e)))?;
    log::set_max_level(max_level);
    Ok(())
}

fn console_logger(quiet: bool, verbose: bool) -> env_logger::Logger {
    let level = if quiet {
        LevelFilter::Warn
    } else if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if verbose {
        builder.format_timestamp_millis();
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Error | log::Level::Warn => {
                writeln!(buf, "{}: {}", record.level(), record.args())
            }
            _ => writeln!(buf, "{}", record.args()),
        });
    }
    builder.parse_default_env();
    builder.build()
}

fn file_logger(path: &Path) -> Result<env_logger::Logger, CliError> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| CliError::config(format!("Cannot open log file {}: {}", path.display(), e)))?;

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(LevelFilter::Debug)
        .format_timestamp_millis()
        .write_style(env_logger::WriteStyle::Never)
        .target(env_logger::Target::Pipe(Box::new(
            strip_ansi_escapes::Writer::new(file),
        )));
    Ok(builder.build())
}
