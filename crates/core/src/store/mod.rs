//! Record store for diagnostic-test rows, backed by SQLite.
//!
//! The store holds only the database path. Every operation opens its own connection, uses it,
//! and drops it before returning, so no connection outlives a single call and nothing is shared
//! between requests.

mod schema;

pub use schema::SCHEMA;

use crate::record::DiagnosticTest;
use labtrack_types::{NonEmptyText, TestDate};
use labtrack_uuid::TestId;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("corrupted row {id}: {reason}")]
    CorruptRow { id: String, reason: String },
}

pub type DbResult<T> = Result<T, DbError>;

/// Handle to the SQLite database holding the `diagnostic_tests` table.
#[derive(Clone, Debug)]
pub struct SqliteStore {
    path: PathBuf,
}

impl SqliteStore {
    /// Open (creating if needed) the database at `path` and apply the schema.
    pub fn initialise<P: Into<PathBuf>>(path: P) -> DbResult<Self> {
        let path = path.into();
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!("record store ready at {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a connection for the duration of one operation.
    ///
    /// The database file must already exist; a missing file is reported as an error instead
    /// of silently creating an empty database without the table.
    fn connect(&self) -> DbResult<Connection> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        Ok(Connection::open_with_flags(&self.path, flags)?)
    }

    /// List all records in the store's natural order.
    pub fn list(&self) -> DbResult<Vec<DiagnosticTest>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, patient_name, test_type, result, test_date, notes
            FROM diagnostic_tests
            ORDER BY rowid
            "#,
        )?;

        let rows = stmt.query_map([], StoredRow::from_row)?;

        let tests = rows
            .map(|row| row.map_err(DbError::from).and_then(StoredRow::into_record))
            .collect::<DbResult<Vec<_>>>()?;
        Ok(tests)
    }

    /// Insert a new record.
    pub fn insert(&self, test: &DiagnosticTest) -> DbResult<()> {
        let conn = self.connect()?;
        conn.execute(
            r#"
            INSERT INTO diagnostic_tests (id, patient_name, test_type, result, test_date, notes)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                test.id.to_string(),
                test.patient_name.as_str(),
                test.test_type.as_str(),
                test.result.as_str(),
                test.test_date.to_canonical(),
                test.notes,
            ],
        )?;
        Ok(())
    }

    /// Get a record by ID.
    pub fn get(&self, id: &TestId) -> DbResult<Option<DiagnosticTest>> {
        let conn = self.connect()?;
        let row = conn
            .query_row(
                r#"
                SELECT id, patient_name, test_type, result, test_date, notes
                FROM diagnostic_tests
                WHERE id = ?
                "#,
                [id.to_string()],
                StoredRow::from_row,
            )
            .optional()?;

        row.map(StoredRow::into_record).transpose()
    }

    /// Replace every field except `id` of an existing record.
    ///
    /// Returns `false` if no record with that ID exists.
    pub fn update(&self, test: &DiagnosticTest) -> DbResult<bool> {
        let conn = self.connect()?;
        let rows_affected = conn.execute(
            r#"
            UPDATE diagnostic_tests SET
                patient_name = ?2,
                test_type = ?3,
                result = ?4,
                test_date = ?5,
                notes = ?6
            WHERE id = ?1
            "#,
            params![
                test.id.to_string(),
                test.patient_name.as_str(),
                test.test_type.as_str(),
                test.result.as_str(),
                test.test_date.to_canonical(),
                test.notes,
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a record.
    ///
    /// Returns `false` if no record with that ID exists.
    pub fn delete(&self, id: &TestId) -> DbResult<bool> {
        let conn = self.connect()?;
        let rows_affected = conn.execute(
            "DELETE FROM diagnostic_tests WHERE id = ?",
            [id.to_string()],
        )?;
        Ok(rows_affected > 0)
    }
}

/// A row as stored, before the text columns are checked.
struct StoredRow {
    id: String,
    patient_name: String,
    test_type: String,
    result: String,
    test_date: String,
    notes: String,
}

impl StoredRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            patient_name: row.get(1)?,
            test_type: row.get(2)?,
            result: row.get(3)?,
            test_date: row.get(4)?,
            notes: row.get(5)?,
        })
    }

    fn into_record(self) -> DbResult<DiagnosticTest> {
        let corrupt = |reason: String| DbError::CorruptRow {
            id: self.id.clone(),
            reason,
        };

        let id = TestId::parse(&self.id).map_err(|e| corrupt(e.to_string()))?;
        let patient_name = NonEmptyText::new(&self.patient_name)
            .map_err(|e| corrupt(format!("patient_name: {e}")))?;
        let test_type =
            NonEmptyText::new(&self.test_type).map_err(|e| corrupt(format!("test_type: {e}")))?;
        let result =
            NonEmptyText::new(&self.result).map_err(|e| corrupt(format!("result: {e}")))?;
        let test_date =
            TestDate::parse(&self.test_date).map_err(|e| corrupt(format!("test_date: {e}")))?;

        Ok(DiagnosticTest {
            id,
            patient_name,
            test_type,
            result,
            test_date,
            notes: self.notes,
        })
    }
}
