//! The bidirectional field-mapping engine between the SPDX object model
//! and the gateway asset payload.
//!
//! Each submodule owns one layer of the mapping, leaves first: licenses,
//! creator identities, flat leaf entities, files/snippets, the package,
//! and finally the whole document. Encoding builds `serde_json::Value`
//! trees; decoding walks them with required-key extraction — a missing
//! key is a hard `MissingField` error, never a silent default.

pub mod document;
pub mod entities;
pub mod file;
pub mod identity;
pub mod license;
pub mod package;

use crate::errors::ConverterError;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

pub(crate) type JsonObject = Map<String, Value>;

/// Strict wire pattern for review and annotation dates. The literal dot
/// plus `%6f` makes the six fractional digits mandatory on parse;
/// `%.6f` would treat them as optional.
pub(crate) const MICRO_PATTERN: &str = "%Y-%m-%dT%H:%M:%S.%6fZ";

/// Pattern for `documentCreatedDate` and tag-value `Created` timestamps.
pub(crate) const SECONDS_PATTERN: &str = "%Y-%m-%dT%H:%M:%SZ";

pub(crate) fn as_object<'a>(
    value: &'a Value,
    entity: &'static str,
    field: &'static str,
) -> Result<&'a JsonObject, ConverterError> {
    value.as_object().ok_or(ConverterError::FieldType {
        entity,
        field,
        expected: "object",
    })
}

pub(crate) fn require<'a>(
    obj: &'a JsonObject,
    entity: &'static str,
    field: &'static str,
) -> Result<&'a Value, ConverterError> {
    obj.get(field)
        .ok_or(ConverterError::MissingField { entity, field })
}

/// Required string field. JSON `null` decodes as the empty string, which
/// is how absent free-text travels inside the metadata tree.
pub(crate) fn require_str(
    obj: &JsonObject,
    entity: &'static str,
    field: &'static str,
) -> Result<String, ConverterError> {
    match require(obj, entity, field)? {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        _ => Err(ConverterError::FieldType {
            entity,
            field,
            expected: "string",
        }),
    }
}

pub(crate) fn require_object<'a>(
    obj: &'a JsonObject,
    entity: &'static str,
    field: &'static str,
) -> Result<&'a JsonObject, ConverterError> {
    require(obj, entity, field)?
        .as_object()
        .ok_or(ConverterError::FieldType {
            entity,
            field,
            expected: "object",
        })
}

/// Optional string field: absent or `null` both decode to `None`.
/// Used where the wire format tolerates dropped keys (license url/name).
pub(crate) fn optional_str(obj: &JsonObject, field: &str) -> Option<String> {
    match obj.get(field) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// The comment asymmetry: encoders emit `comment` only when present, but
/// decoders read the key unconditionally, so a decode without it fails
/// with `MissingField`. An empty or `null` value decodes to `None`.
pub(crate) fn require_comment(
    obj: &JsonObject,
    entity: &'static str,
) -> Result<Option<String>, ConverterError> {
    match require(obj, entity, "comment")? {
        Value::String(s) if s.is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Null => Ok(None),
        _ => Err(ConverterError::FieldType {
            entity,
            field: "comment",
            expected: "string",
        }),
    }
}

/// Format a review/annotation date with the strict microsecond pattern.
pub(crate) fn format_timestamp(value: &NaiveDateTime) -> String {
    value.format(MICRO_PATTERN).to_string()
}

/// Parse a review/annotation date. The pattern is strict: exactly six
/// fractional digits and a trailing `Z`, or the whole decode fails.
pub(crate) fn parse_timestamp(
    value: &str,
    field: &'static str,
) -> Result<NaiveDateTime, ConverterError> {
    NaiveDateTime::parse_from_str(value, MICRO_PATTERN).map_err(|_| ConverterError::Timestamp {
        field,
        value: value.to_string(),
        pattern: "YYYY-MM-DDTHH:MM:SS.ffffffZ",
    })
}

pub(crate) fn format_created(value: &NaiveDateTime) -> String {
    value.format(SECONDS_PATTERN).to_string()
}

/// Parse a creation timestamp. Seconds precision is canonical; fractional
/// seconds and a missing `Z` are tolerated for assets written by older
/// exporters.
pub(crate) fn parse_created(
    value: &str,
    field: &'static str,
) -> Result<NaiveDateTime, ConverterError> {
    NaiveDateTime::parse_from_str(value, SECONDS_PATTERN)
        .or_else(|_| NaiveDateTime::parse_from_str(value, MICRO_PATTERN))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .map_err(|_| ConverterError::Timestamp {
            field,
            value: value.to_string(),
            pattern: "YYYY-MM-DDTHH:MM:SS[.ffffff]Z",
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn obj(value: Value) -> JsonObject {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn test_require_str_reports_missing_field() {
        let err = require_str(&obj(json!({})), "package", "name").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing field `name` in package"
        );
    }

    #[test]
    fn test_require_str_maps_null_to_empty() {
        let fields = obj(json!({ "comment": null }));
        assert_eq!(require_str(&fields, "package", "comment").unwrap(), "");
    }

    #[test]
    fn test_strict_timestamp_round_trip() {
        let date = NaiveDate::from_ymd_opt(2021, 3, 1)
            .unwrap()
            .and_hms_micro_opt(9, 30, 0, 123456)
            .unwrap();
        let encoded = format_timestamp(&date);
        assert_eq!(encoded, "2021-03-01T09:30:00.123456Z");
        assert_eq!(parse_timestamp(&encoded, "reviewDate").unwrap(), date);
    }

    #[test]
    fn test_strict_timestamp_rejects_seconds_precision() {
        let err = parse_timestamp("2021-03-01T09:30:00Z", "reviewDate").unwrap_err();
        assert!(matches!(err, ConverterError::Timestamp { field: "reviewDate", .. }));
    }

    #[test]
    fn test_strict_timestamp_requires_all_six_fractional_digits() {
        assert!(parse_timestamp("2021-03-01T09:30:00.123456Z", "reviewDate").is_ok());
        for value in ["2021-03-01T09:30:00.123Z", "2021-03-01T09:30:00.Z"] {
            assert!(
                matches!(
                    parse_timestamp(value, "reviewDate").unwrap_err(),
                    ConverterError::Timestamp { field: "reviewDate", .. }
                ),
                "{value}"
            );
        }
    }

    #[test]
    fn test_parse_created_accepts_known_variants() {
        for value in [
            "2021-03-01T09:30:00Z",
            "2021-03-01T09:30:00.000000Z",
            "2021-03-01T09:30:00",
        ] {
            assert!(parse_created(value, "documentCreatedDate").is_ok(), "{value}");
        }
        assert!(parse_created("yesterday", "documentCreatedDate").is_err());
    }
}
