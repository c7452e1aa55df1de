//! The License Codec: recursive encode/decode of single licenses and
//! license conjunctions in the DBoM gateway's wire shape.
//!
//! The variant discriminator on the wire is the encoded SHAPE, not a tag:
//! a leaf is an object with an `id` key, a conjunction is a 2-element
//! array `[left, right]`. That convention predates this tool and must be
//! preserved exactly for compatibility with assets already on the ledger.

use crate::errors::ConverterError;
use crate::models_spdx::License;
use serde_json::{Value, json};

use super::{optional_str, require_str};

/// Encode one license node. Leaves carry `id`, `url` and `name`, with
/// `null` standing in for an absent url or name.
pub fn encode_license(license: &License) -> Value {
    match license {
        License::Leaf {
            identifier,
            full_name,
            url,
        } => json!({
            "id": identifier,
            "url": url,
            "name": full_name,
        }),
        License::Conjunction(left, right) => {
            json!([encode_license(left), encode_license(right)])
        }
    }
}

/// Decode one license node, recursing into conjunctions.
///
/// `id` is required on a leaf; `url` and `name` tolerate missing keys as
/// well as `null`. Any shape other than an object or a 2-element array
/// is an error.
pub fn decode_license(value: &Value, entity: &'static str) -> Result<License, ConverterError> {
    match value {
        Value::Array(items) if items.len() == 2 => Ok(License::Conjunction(
            Box::new(decode_license(&items[0], entity)?),
            Box::new(decode_license(&items[1], entity)?),
        )),
        Value::Object(fields) => Ok(License::Leaf {
            identifier: require_str(fields, entity, "id")?,
            full_name: optional_str(fields, "name"),
            url: optional_str(fields, "url"),
        }),
        _ => Err(ConverterError::FieldType {
            entity,
            field: "license",
            expected: "object with `id` or 2-element array",
        }),
    }
}

/// Encode an ordered list of leaf licenses (from-file / in-file /
/// in-snippet sets). Conjunctions are not expected here.
pub fn encode_license_list(licenses: &[License]) -> Value {
    Value::Array(licenses.iter().map(encode_license).collect())
}

/// Decode an ordered list of leaf licenses, preserving input order.
pub fn decode_license_list(
    value: &Value,
    entity: &'static str,
) -> Result<Vec<License>, ConverterError> {
    let items = value.as_array().ok_or(ConverterError::FieldType {
        entity,
        field: "license list",
        expected: "array",
    })?;
    items
        .iter()
        .map(|item| decode_license(item, entity))
        .collect()
}
