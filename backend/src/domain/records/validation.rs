//! Field checks shared by record collections.

use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::Error;

/// Longest accepted free-text value, in characters.
pub(super) const TEXT_MAX: usize = 200;

/// Longest accepted notes value, in characters.
pub(super) const NOTES_MAX: usize = 2_000;

/// A client field failed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordValidationError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl RecordValidationError {
    pub(crate) fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Wire name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }

    /// Machine-readable failure code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable explanation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for RecordValidationError {}

impl From<RecordValidationError> for Error {
    fn from(err: RecordValidationError) -> Self {
        Self::invalid_request(err.message).with_details(json!({
            "field": err.field,
            "code": err.code,
        }))
    }
}

pub(super) fn required_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, RecordValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordValidationError::new(
            field,
            "empty",
            format!("{field} must not be empty"),
        ));
    }
    if trimmed.chars().count() > max {
        return Err(too_long(field, max));
    }
    Ok(trimmed.to_owned())
}

pub(super) fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, RecordValidationError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(trimmed) if trimmed.chars().count() > max => Err(too_long(field, max)),
        Some(trimmed) => Ok(Some(trimmed.to_owned())),
    }
}

fn too_long(field: &'static str, max: usize) -> RecordValidationError {
    RecordValidationError::new(
        field,
        "too_long",
        format!("{field} must be at most {max} characters"),
    )
}

pub(super) fn non_negative(field: &'static str, value: f64) -> Result<f64, RecordValidationError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(RecordValidationError::new(
            field,
            "out_of_range",
            format!("{field} must be a finite number of at least 0"),
        ))
    }
}

pub(super) fn not_before(
    field: &'static str,
    value: DateTime<Utc>,
    earliest_field: &'static str,
    earliest: DateTime<Utc>,
) -> Result<DateTime<Utc>, RecordValidationError> {
    if value < earliest {
        return Err(RecordValidationError::new(
            field,
            "before_start",
            format!("{field} must not be earlier than {earliest_field}"),
        ));
    }
    Ok(value)
}
