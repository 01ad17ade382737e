//! Shared parsing helpers for path, query and body values.
//!
//! Failures become `400 invalid_request` with `details.field`,
//! `details.value` and `details.code`.

use std::str::FromStr;

use serde_json::json;

use crate::domain::{Error, UnknownVariant};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    UnknownValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::InvalidUuid => "invalid_uuid",
            Self::UnknownValue => "unknown_value",
        }
    }
}

/// Wire name of a request field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

/// Parse a UUID-backed identifier.
pub(crate) fn parse_id<T: FromStr>(raw: &str, field: FieldName) -> Result<T, Error> {
    raw.parse().map_err(|_| {
        field_error(
            field,
            ErrorCode::InvalidUuid,
            format!("{} must be a valid UUID", field.as_str()),
            raw,
        )
    })
}

/// Parse a closed vocabulary value such as a metric type.
pub(crate) fn parse_vocabulary<T>(raw: &str, field: FieldName) -> Result<T, Error>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.parse().map_err(|err: UnknownVariant| {
        field_error(field, ErrorCode::UnknownValue, err.to_string(), raw)
    })
}

/// Parse an optional vocabulary value.
pub(crate) fn parse_optional_vocabulary<T>(
    raw: Option<&str>,
    field: FieldName,
) -> Result<Option<T>, Error>
where
    T: FromStr<Err = UnknownVariant>,
{
    raw.map(|value| parse_vocabulary(value, field)).transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode as ApiCode, MetricType, OrganizationId, Timeframe};
    use rstest::rstest;

    #[rstest]
    fn vocabulary_errors_name_the_field() {
        let error = parse_vocabulary::<MetricType>("mystery", FieldName::new("metricType"))
            .expect_err("unknown metric");

        assert_eq!(error.code(), ApiCode::InvalidRequest);
        assert_eq!(error.message(), "unknown metric type 'mystery'");
        assert_eq!(
            error.details(),
            Some(&json!({"field": "metricType", "value": "mystery", "code": "unknown_value"}))
        );
    }

    #[rstest]
    fn absent_optional_values_pass() {
        assert_eq!(
            parse_optional_vocabulary::<Timeframe>(None, FieldName::new("timeframe")),
            Ok(None)
        );
        assert_eq!(
            parse_optional_vocabulary::<Timeframe>(Some("year"), FieldName::new("timeframe")),
            Ok(Some(Timeframe::Year))
        );
    }

    #[rstest]
    fn ids_must_be_uuids() {
        let error =
            parse_id::<OrganizationId>("42", FieldName::new("id")).expect_err("not a uuid");
        assert_eq!(
            error.details().and_then(|details| details.get("code")),
            Some(&json!("invalid_uuid"))
        );
    }
}
