//! # Labtrack Core
//!
//! Core business logic for the labtrack diagnostic-test tracker.
//!
//! This crate contains pure data operations:
//! - The [`DiagnosticTest`] record and its validation
//! - The SQLite-backed record store
//! - [`TestService`], the CRUD operations API layers call into
//!
//! **No API concerns**: HTTP servers, status codes and JSON shapes belong in `api-rest` and
//! `api-shared`.

pub mod config;
pub mod constants;
pub mod error;
pub mod record;
pub mod service;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use constants::DEFAULT_DATABASE_PATH;
pub use error::{FieldError, TestError, TestResult};
pub use labtrack_types::{DateError, NonEmptyText, TestDate, TextError};
pub use labtrack_uuid::{TestId, UuidError};
pub use record::{DiagnosticTest, TestFields, TestInput};
pub use service::TestService;
pub use store::{DbError, DbResult, SqliteStore};
