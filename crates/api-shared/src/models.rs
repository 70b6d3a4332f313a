//! JSON wire types for the `/tests` resource.
//!
//! Field names are camelCase on the wire (`patientName`, `testDate`, ...).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

/// Request body for creating or replacing a diagnostic test.
///
/// Every field is optional at the JSON level; missing required fields are reported by the
/// server as validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestReq {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Jane Doe")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Full blood count")]
    pub test_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Normal")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2024-03-01T08:30:00.000Z")]
    pub test_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A stored diagnostic test as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestRes {
    #[schema(example = "550e8400e29b41d4a716446655440000")]
    pub id: String,
    pub patient_name: String,
    pub test_type: String,
    pub result: String,
    /// RFC 3339, UTC, millisecond precision.
    pub test_date: String,
    #[serde(default)]
    pub notes: String,
}

impl From<&TestRes> for TestReq {
    fn from(test: &TestRes) -> Self {
        Self {
            patient_name: Some(test.patient_name.clone()),
            test_type: Some(test.test_type.clone()),
            result: Some(test.result.clone()),
            test_date: Some(test.test_date.clone()),
            notes: Some(test.notes.clone()),
        }
    }
}

/// Confirmation returned after a delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteTestRes {
    pub message: String,
}

/// A rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldErrorRes {
    pub field: String,
    pub message: String,
}

/// Error body returned for every non-success status.
///
/// `details` is only present for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    pub error: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldErrorRes>,
}

impl ErrorRes {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Vec::new(),
        }
    }
}
