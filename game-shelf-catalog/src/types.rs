//! Data model types for the game shelf.
//!
//! These types represent the persistent schema: games, the platform and genre
//! lookup lists, the links between them, and import tracking.

use serde::{Deserialize, Serialize};

// ── Game ────────────────────────────────────────────────────────────────────

/// A stored game row, without its platform/genre links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: i64,
    pub title: String,
    /// Free text, e.g. "2023-01-01" or "spring 2021".
    pub start_date: String,
    pub end_date: String,
    pub completed: bool,
    pub steam_store_url: String,
    pub gog_store_url: String,
    pub image_url: String,
    pub comments: String,
    /// Free-text tags as typed by the user; not a lookup list.
    pub tags: String,
    pub developer: String,
    pub rating: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// The editable fields of a game plus the lookup ids it should link to.
///
/// Used for both create and update. Link ids that do not exist in the
/// corresponding lookup table are ignored at the persistence layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewGame {
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub completed: bool,
    pub steam_store_url: String,
    pub gog_store_url: String,
    pub image_url: String,
    pub comments: String,
    pub tags: String,
    pub developer: String,
    pub rating: i64,
    pub platform_ids: Vec<i64>,
    pub genre_ids: Vec<i64>,
}

impl NewGame {
    /// Create a game with only a title set.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Requested link ids for one lookup kind.
    pub fn link_ids(&self, kind: LookupKind) -> &[i64] {
        match kind {
            LookupKind::Platform => &self.platform_ids,
            LookupKind::Genre => &self.genre_ids,
        }
    }

    /// Remove repeated link ids, keeping the first occurrence of each.
    pub fn dedup_links(&mut self) {
        dedup_preserving_order(&mut self.platform_ids);
        dedup_preserving_order(&mut self.genre_ids);
    }
}

fn dedup_preserving_order(ids: &mut Vec<i64>) {
    let mut seen = std::collections::HashSet::new();
    ids.retain(|id| seen.insert(*id));
}

// ── Lookups ─────────────────────────────────────────────────────────────────

/// A row from one of the fixed lookup lists (platforms or genres).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lookup {
    pub id: i64,
    pub name: String,
}

/// Which lookup list a row or link belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    Platform,
    Genre,
}

impl LookupKind {
    pub const ALL: [LookupKind; 2] = [LookupKind::Platform, LookupKind::Genre];

    /// Table holding the lookup rows.
    pub fn table(self) -> &'static str {
        match self {
            Self::Platform => "platforms",
            Self::Genre => "genres",
        }
    }

    /// Join table linking games to this lookup.
    pub fn link_table(self) -> &'static str {
        match self {
            Self::Platform => "game_platforms",
            Self::Genre => "game_genres",
        }
    }

    /// Foreign-key column in the join table.
    pub fn link_column(self) -> &'static str {
        match self {
            Self::Platform => "platform_id",
            Self::Genre => "genre_id",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Platform => "platform",
            Self::Genre => "genre",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Read models ─────────────────────────────────────────────────────────────

/// A game together with its linked lookups (ids and names).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameRecord {
    #[serde(flatten)]
    pub game: Game,
    pub platforms: Vec<Lookup>,
    pub genres: Vec<Lookup>,
}

impl GameRecord {
    pub fn platform_ids(&self) -> Vec<i64> {
        self.platforms.iter().map(|p| p.id).collect()
    }

    pub fn genre_ids(&self) -> Vec<i64> {
        self.genres.iter().map(|g| g.id).collect()
    }
}

/// A game as shown in the listing: linked lookups by name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    #[serde(flatten)]
    pub game: Game,
    pub platforms: Vec<String>,
    pub genres: Vec<String>,
}

// ── Filtering ───────────────────────────────────────────────────────────────

/// Filters for the game listing. All conditions are combined with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameFilter {
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// When true only completed games are listed; false applies no filter.
    pub completed_only: bool,
    /// Minimum rating, inclusive. Zero means none.
    pub min_rating: Option<i64>,
}

impl GameFilter {
    /// The title substring, if one was given and is not blank.
    pub fn title_term(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    /// The minimum rating, if one was given and is non-zero.
    ///
    /// Zero means "no filter". Negative thresholds still apply, since stored
    /// ratings may be negative.
    pub fn rating_floor(&self) -> Option<i64> {
        self.min_rating.filter(|r| *r != 0)
    }

    pub fn is_empty(&self) -> bool {
        self.title_term().is_none() && !self.completed_only && self.rating_floor().is_none()
    }
}

// ── Import Tracking ─────────────────────────────────────────────────────────

/// Log entry for a catalog import.
#[derive(Debug, Clone)]
pub struct ImportLog {
    pub id: i64,
    pub source_name: String,
    pub imported_at: String,
    pub records_created: i64,
    pub records_skipped: i64,
}
