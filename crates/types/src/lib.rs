//! Validated value types shared across the labtrack crates.
//!
//! Values of these types are checked once at construction, so code holding a `NonEmptyText` or a
//! `TestDate` never has to re-validate it.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// Surrounding whitespace is preserved; only whitespace-only input is refused.
    ///
    /// # Errors
    ///
    /// Returns `Err(TextError::Empty)` if the input is empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let input = input.as_ref();
        if input.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(input.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing a [`TestDate`].
#[derive(Debug, thiserror::Error)]
pub enum DateError {
    #[error("Invalid date format: '{0}'")]
    Invalid(String),
}

/// The date and time a diagnostic test was taken, held in UTC.
///
/// Parsing accepts:
/// - RFC 3339 timestamps with any offset (`2024-03-01T09:30:00+01:00`, `2024-03-01T08:30:00.000Z`)
/// - Timestamps without an offset (`2024-03-01T08:30:00`), read as UTC
/// - Plain calendar dates (`2024-03-01`), read as midnight UTC
///
/// The canonical text form is RFC 3339 with millisecond precision and a `Z` suffix, for example
/// `2024-03-01T08:30:00.000Z`. Only years `0000` to `9999` (after conversion to UTC) are
/// accepted, since RFC 3339 has no form for any other year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TestDate(DateTime<Utc>);

impl TestDate {
    /// Parses a date string in one of the accepted forms.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::Invalid`] if the input is not a valid calendar date in any of the
    /// accepted forms (for example `"not-a-date"` or `"2024-02-30"`), or if its UTC year falls
    /// outside `0000..=9999` (for example `"+12345-01-01"`).
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let input = input.trim();

        Self::parse_any(input)
            .filter(|dt| (0..=9999).contains(&dt.year()))
            .map(Self)
            .ok_or_else(|| DateError::Invalid(input.to_owned()))
    }

    fn parse_any(input: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(dt.with_timezone(&Utc));
        }

        if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(naive.and_utc());
        }

        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|midnight| midnight.and_utc())
    }

    /// Returns the canonical RFC 3339 form.
    pub fn to_canonical(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl std::fmt::Display for TestDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_canonical())
    }
}

impl serde::Serialize for TestDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_canonical())
    }
}

impl<'de> serde::Deserialize<'de> for TestDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        TestDate::parse(&s).map_err(serde::de::Error::custom)
    }
}
