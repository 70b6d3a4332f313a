use crate::store::DbError;
use labtrack_uuid::{TestId, UuidError};

/// A single rejected input field.
///
/// `field` is the wire name of the field (`patientName`, `testDate`, ...) so it can be reported
/// back to API callers unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TestError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),
    #[error("invalid test ID: {0}")]
    InvalidId(#[from] UuidError),
    #[error("test result not found: {0}")]
    NotFound(TestId),
    #[error("store error: {0}")]
    Store(#[from] DbError),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type TestResult<T> = std::result::Result<T, TestError>;
