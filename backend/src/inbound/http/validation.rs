//! Shared validation helpers for inbound HTTP adapters.

use chrono::{DateTime, Utc};
use serde_json::json;
use uuid::Uuid;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidUuid,
    InvalidTimestamp,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidUuid => "invalid_uuid",
            ErrorCode::InvalidTimestamp => "invalid_timestamp",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn invalid_value_error(
    field: FieldName,
    message: String,
    code: ErrorCode,
    value: &str,
) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    invalid_value_error(
        field,
        format!("{name} must be a valid UUID"),
        ErrorCode::InvalidUuid,
        value,
    )
}

pub(crate) fn invalid_timestamp_error(field: FieldName, value: &str) -> Error {
    let name = field.as_str();
    invalid_value_error(
        field,
        format!("{name} must be an RFC 3339 timestamp"),
        ErrorCode::InvalidTimestamp,
        value,
    )
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_rfc3339_timestamp(
    value: &str,
    field: FieldName,
) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|_| invalid_timestamp_error(field, value))
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn parse_uuid_accepts_canonical_form() {
        let parsed = parse_uuid(
            "00000000-0000-0000-0000-000000000001",
            FieldName::new("listingId"),
        )
        .expect("valid uuid");
        assert_eq!(parsed.to_string(), "00000000-0000-0000-0000-000000000001");
    }

    #[rstest]
    fn parse_uuid_rejects_garbage_with_field_details() {
        let err = parse_uuid("not-a-uuid", FieldName::new("listingId")).expect_err("must fail");
        let details = err.details().expect("details present");
        assert_eq!(details["field"], "listingId");
        assert_eq!(details["code"], "invalid_uuid");
    }

    #[rstest]
    fn parse_timestamp_normalises_to_utc() {
        let parsed = parse_rfc3339_timestamp(
            "2026-09-01T10:00:00+02:00",
            FieldName::new("rentStartDate"),
        )
        .expect("valid timestamp");
        assert_eq!(parsed.to_rfc3339(), "2026-09-01T08:00:00+00:00");
    }

    #[rstest]
    #[case("yesterday")]
    #[case("2026-09-01")]
    fn parse_timestamp_rejects_non_rfc3339(#[case] raw: &str) {
        let err = parse_rfc3339_timestamp(raw, FieldName::new("rentEndDate"))
            .expect_err("must fail");
        let details = err.details().expect("details present");
        assert_eq!(details["code"], "invalid_timestamp");
    }
}
