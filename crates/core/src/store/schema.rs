//! SQLite schema definition.

/// Schema for the record store. Applied idempotently when the store is initialised.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS diagnostic_tests (
    id TEXT PRIMARY KEY,
    patient_name TEXT NOT NULL,
    test_type TEXT NOT NULL,
    result TEXT NOT NULL,
    test_date TEXT NOT NULL,                      -- RFC 3339, UTC, millisecond precision
    notes TEXT NOT NULL DEFAULT ''
);
"#;
