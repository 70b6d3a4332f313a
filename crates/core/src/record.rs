//! The diagnostic-test record and its unvalidated input form.

use labtrack_types::{NonEmptyText, TestDate};
use labtrack_uuid::TestId;

/// Field values for a diagnostic test as submitted by a caller, before validation.
///
/// Every field is optional here so that a missing field is reported as a validation error
/// rather than a deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestInput {
    pub patient_name: Option<String>,
    pub test_type: Option<String>,
    pub result: Option<String>,
    pub test_date: Option<String>,
    pub notes: Option<String>,
}

/// Validated field values for a diagnostic test, everything except the identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestFields {
    pub patient_name: NonEmptyText,
    pub test_type: NonEmptyText,
    pub result: NonEmptyText,
    pub test_date: TestDate,
    pub notes: String,
}

/// A stored diagnostic-test record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticTest {
    pub id: TestId,
    pub patient_name: NonEmptyText,
    pub test_type: NonEmptyText,
    pub result: NonEmptyText,
    pub test_date: TestDate,
    pub notes: String,
}

impl DiagnosticTest {
    pub fn from_fields(id: TestId, fields: TestFields) -> Self {
        Self {
            id,
            patient_name: fields.patient_name,
            test_type: fields.test_type,
            result: fields.result,
            test_date: fields.test_date,
            notes: fields.notes,
        }
    }
}
