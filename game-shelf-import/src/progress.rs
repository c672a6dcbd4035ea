//! Progress reporting for catalog imports.
//!
//! The importer reports every catalog entry together with what happened to
//! it, so callers can show skipped titles without re-querying the database.

/// What the importer did with one catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// A new game row was inserted.
    Created,
    /// The title already exists in the database or earlier in the file.
    Duplicate,
}

/// Receives updates while a catalog is imported.
pub trait ImportProgress {
    /// One catalog entry was handled. `current` counts from 1.
    fn on_entry(&self, current: usize, total: usize, title: &str, outcome: EntryOutcome);

    /// A catalog file is about to be read.
    fn on_phase(&self, message: &str);

    /// The import committed; `message` summarises the counts.
    fn on_complete(&self, message: &str);
}

/// Discards every update.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_entry(&self, _current: usize, _total: usize, _title: &str, _outcome: EntryOutcome) {}
    fn on_phase(&self, _message: &str) {}
    fn on_complete(&self, _message: &str) {}
}

/// Reports through the `log` crate.
///
/// Duplicates are logged at info level as they happen; created entries only
/// show at debug level, with an info line every 100 entries.
pub struct LogProgress;

impl ImportProgress for LogProgress {
    fn on_entry(&self, current: usize, total: usize, title: &str, outcome: EntryOutcome) {
        match outcome {
            EntryOutcome::Duplicate => {
                log::info!("  Game {} already exists, skipping", title);
            }
            EntryOutcome::Created => log::debug!("  Added {}", title),
        }
        if current % 100 == 0 || current == total {
            log::info!("  [{}/{}] entries processed", current, total);
        }
    }

    fn on_phase(&self, message: &str) {
        log::info!("{}", message);
    }

    fn on_complete(&self, message: &str) {
        log::info!("{}", message);
    }
}
