//! Game catalog data model types and lookup-list definitions.
//!
//! This crate defines the persistent data model for the game shelf without
//! any database dependencies. Consumers can use these types directly for
//! serialization, display, or passing to `game-shelf-db` for persistence.

pub mod lookups;
pub mod types;

pub use lookups::{DEFAULT_GENRES, DEFAULT_PLATFORMS, LookupError, Lookups, load_lookups};
pub use types::*;
