//! Diagnostic-test CRUD operations.
//!
//! [`TestService`] is the single entry point API layers use to read and mutate test records.
//! It owns validation and identifier parsing, so malformed input is rejected before the store
//! is touched.
//!
//! ## Pure Data Operations
//!
//! This module contains **only** data operations. HTTP status mapping, routing and JSON
//! concerns belong in `api-rest`.

use crate::config::CoreConfig;
use crate::error::{TestError, TestResult};
use crate::record::{DiagnosticTest, TestInput};
use crate::store::SqliteStore;
use crate::validation::validate_test_input;
use labtrack_uuid::TestId;

/// Service for diagnostic-test records.
#[derive(Clone, Debug)]
pub struct TestService {
    store: SqliteStore,
}

impl TestService {
    /// Initialises the record store named by `cfg` and returns a service over it.
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Store`] if the database cannot be opened or the schema cannot be
    /// applied.
    pub fn new(cfg: &CoreConfig) -> TestResult<Self> {
        let store = SqliteStore::initialise(cfg.database_path())?;
        Ok(Self { store })
    }

    /// Returns every stored record in the store's natural order.
    pub fn list(&self) -> TestResult<Vec<DiagnosticTest>> {
        let tests = self.store.list()?;
        tracing::debug!("listed {} test results", tests.len());
        Ok(tests)
    }

    /// Validates `input` and stores it as a new record with a freshly assigned ID.
    ///
    /// # Errors
    ///
    /// - [`TestError::Validation`] listing every offending field; nothing is stored.
    /// - [`TestError::Store`] if the insert fails.
    pub fn create(&self, input: TestInput) -> TestResult<DiagnosticTest> {
        let fields = validate_test_input(input).map_err(TestError::Validation)?;
        let test = DiagnosticTest::from_fields(TestId::new(), fields);

        self.store.insert(&test)?;
        tracing::info!("created test result {}", test.id);
        Ok(test)
    }

    /// Fetches the record with the given ID.
    ///
    /// # Errors
    ///
    /// - [`TestError::InvalidId`] if `id` is not a canonical test ID.
    /// - [`TestError::NotFound`] if no such record exists.
    pub fn get(&self, id: &str) -> TestResult<DiagnosticTest> {
        let id = TestId::parse(id)?;
        self.store.get(&id)?.ok_or(TestError::NotFound(id))
    }

    /// Validates `input` and replaces every field of the record with the given ID.
    ///
    /// The ID is checked first, then the input, then the record's existence.
    ///
    /// # Errors
    ///
    /// - [`TestError::InvalidId`] if `id` is not a canonical test ID.
    /// - [`TestError::Validation`] listing every offending field.
    /// - [`TestError::NotFound`] if no such record exists.
    pub fn update(&self, id: &str, input: TestInput) -> TestResult<DiagnosticTest> {
        let id = TestId::parse(id)?;
        let fields = validate_test_input(input).map_err(TestError::Validation)?;
        let test = DiagnosticTest::from_fields(id, fields);

        if !self.store.update(&test)? {
            return Err(TestError::NotFound(id));
        }
        tracing::info!("updated test result {}", id);
        Ok(test)
    }

    /// Removes the record with the given ID.
    ///
    /// # Errors
    ///
    /// - [`TestError::InvalidId`] if `id` is not a canonical test ID.
    /// - [`TestError::NotFound`] if no such record exists, including when it was already
    ///   deleted.
    pub fn delete(&self, id: &str) -> TestResult<()> {
        let id = TestId::parse(id)?;

        if !self.store.delete(&id)? {
            return Err(TestError::NotFound(id));
        }
        tracing::info!("deleted test result {}", id);
        Ok(())
    }
}
