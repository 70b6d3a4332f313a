//! Input validation for diagnostic-test records.
//!
//! Create and update share one validator. It checks every field and reports all failures
//! together instead of stopping at the first.

use crate::error::FieldError;
use crate::record::{TestFields, TestInput};
use labtrack_types::{NonEmptyText, TestDate};

pub const PATIENT_NAME_FIELD: &str = "patientName";
pub const TEST_TYPE_FIELD: &str = "testType";
pub const RESULT_FIELD: &str = "result";
pub const TEST_DATE_FIELD: &str = "testDate";

/// Validates raw input into [`TestFields`].
///
/// # Errors
///
/// Returns every offending field if any of `patientName`, `testType`, `result` is missing or
/// blank, or if `testDate` is missing or not a valid date. `notes` is never rejected; a missing
/// value becomes the empty string.
pub fn validate_test_input(input: TestInput) -> Result<TestFields, Vec<FieldError>> {
    let mut errors = Vec::new();

    let patient_name = required_text(PATIENT_NAME_FIELD, input.patient_name, &mut errors);
    let test_type = required_text(TEST_TYPE_FIELD, input.test_type, &mut errors);
    let result = required_text(RESULT_FIELD, input.result, &mut errors);
    let test_date = required_date(input.test_date, &mut errors);

    match (patient_name, test_type, result, test_date) {
        (Some(patient_name), Some(test_type), Some(result), Some(test_date)) => Ok(TestFields {
            patient_name,
            test_type,
            result,
            test_date,
            notes: input.notes.unwrap_or_default(),
        }),
        _ => Err(errors),
    }
}

fn required_text(
    field: &'static str,
    value: Option<String>,
    errors: &mut Vec<FieldError>,
) -> Option<NonEmptyText> {
    let Some(value) = value else {
        errors.push(FieldError::new(field, "is required"));
        return None;
    };

    match NonEmptyText::new(value) {
        Ok(text) => Some(text),
        Err(e) => {
            errors.push(FieldError::new(field, e.to_string()));
            None
        }
    }
}

fn required_date(value: Option<String>, errors: &mut Vec<FieldError>) -> Option<TestDate> {
    let Some(value) = value else {
        errors.push(FieldError::new(TEST_DATE_FIELD, "is required"));
        return None;
    };

    match TestDate::parse(&value) {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(TEST_DATE_FIELD, "Invalid date format"));
            None
        }
    }
}
