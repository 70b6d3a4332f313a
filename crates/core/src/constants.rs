//! Constants used throughout the labtrack core crate.

/// Default SQLite database file used when no explicit path is configured.
pub const DEFAULT_DATABASE_PATH: &str = "labtrack.db";
