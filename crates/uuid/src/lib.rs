//! Diagnostic-test identifiers.
//!
//! Every stored test record is keyed by a [`TestId`]. The store assigns one on creation and it
//! never changes afterwards.
//!
//! Identifiers use a *canonical* text representation: **32 lowercase hexadecimal characters**
//! (no hyphens), for example `550e8400e29b41d4a716446655440000`. This is the same value you would
//! get from `Uuid::new_v4().simple().to_string()`.
//!
//! Canonical form is *required* for externally supplied identifiers (URL path segments, CLI
//! arguments). Use [`TestId::parse`] to validate an input string; hyphenated, uppercase,
//! wrong-length or non-hex values are rejected rather than normalised.

mod service;

pub use service::{TestId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UuidResult<T> = Result<T, UuidError>;
