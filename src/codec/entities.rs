//! Leaf-entity codecs: reviews, annotations, external package references
//! and the checksum pair. Flat record mappings with no recursion.

use crate::errors::ConverterError;
use crate::models_spdx::{Annotation, Checksum, ExternalPackageRef, Person, Review};
use serde_json::{Value, json};

use super::{
    JsonObject, as_object, format_timestamp, parse_timestamp, require_comment, require_object,
    require_str,
};

// --- Reviews ---

/// Encode one review. `comment` is emitted only when present.
pub fn encode_review(review: &Review) -> Value {
    let mut fields = JsonObject::new();
    fields.insert("reviewer".to_string(), json!(review.reviewer.name));
    fields.insert(
        "reviewDate".to_string(),
        json!(format_timestamp(&review.review_date)),
    );
    if let Some(comment) = &review.comment {
        fields.insert("comment".to_string(), json!(comment));
    }
    Value::Object(fields)
}

/// Decode one review. The reviewer's email is never recovered on import;
/// the decoded `Person` always carries an empty email.
pub fn decode_review(value: &Value) -> Result<Review, ConverterError> {
    let fields = as_object(value, "review", "review")?;
    Ok(Review {
        reviewer: Person {
            name: require_str(fields, "review", "reviewer")?,
            email: String::new(),
        },
        review_date: parse_timestamp(&require_str(fields, "review", "reviewDate")?, "reviewDate")?,
        comment: require_comment(fields, "review")?,
    })
}

pub fn encode_review_list(reviews: &[Review]) -> Value {
    Value::Array(reviews.iter().map(encode_review).collect())
}

pub fn decode_review_list(value: &Value) -> Result<Vec<Review>, ConverterError> {
    let items = value.as_array().ok_or(ConverterError::FieldType {
        entity: "asset metadata",
        field: "reviews",
        expected: "array",
    })?;
    items.iter().map(decode_review).collect()
}

// --- Annotations ---

pub fn encode_annotation(annotation: &Annotation) -> Value {
    json!({
        "id": annotation.spdx_id,
        "comment": annotation.comment,
        "type": annotation.annotation_type,
        "date": format_timestamp(&annotation.date),
        "annotator": {
            "name": annotation.annotator.name,
            "email": annotation.annotator.email,
        },
    })
}

pub fn decode_annotation(value: &Value) -> Result<Annotation, ConverterError> {
    let fields = as_object(value, "annotation", "annotation")?;
    let annotator = require_object(fields, "annotation", "annotator")?;
    Ok(Annotation {
        spdx_id: require_str(fields, "annotation", "id")?,
        comment: require_str(fields, "annotation", "comment")?,
        annotation_type: require_str(fields, "annotation", "type")?,
        date: parse_timestamp(&require_str(fields, "annotation", "date")?, "date")?,
        annotator: Person {
            name: require_str(annotator, "annotator", "name")?,
            email: require_str(annotator, "annotator", "email")?,
        },
    })
}

pub fn encode_annotation_list(annotations: &[Annotation]) -> Value {
    Value::Array(annotations.iter().map(encode_annotation).collect())
}

pub fn decode_annotation_list(value: &Value) -> Result<Vec<Annotation>, ConverterError> {
    let items = value.as_array().ok_or(ConverterError::FieldType {
        entity: "asset metadata",
        field: "annotations",
        expected: "array",
    })?;
    items.iter().map(decode_annotation).collect()
}

// --- External package references ---

/// Encode one external reference. Like reviews, `comment` is omitted
/// entirely when absent (no `null` placeholder).
pub fn encode_pkgref(pkgref: &ExternalPackageRef) -> Value {
    let mut fields = JsonObject::new();
    fields.insert("category".to_string(), json!(pkgref.category));
    fields.insert("locator".to_string(), json!(pkgref.locator));
    fields.insert("type".to_string(), json!(pkgref.ref_type));
    if let Some(comment) = &pkgref.comment {
        fields.insert("comment".to_string(), json!(comment));
    }
    Value::Object(fields)
}

pub fn decode_pkgref(value: &Value) -> Result<ExternalPackageRef, ConverterError> {
    let fields = as_object(value, "external package ref", "extref")?;
    Ok(ExternalPackageRef {
        category: require_str(fields, "external package ref", "category")?,
        locator: require_str(fields, "external package ref", "locator")?,
        ref_type: require_str(fields, "external package ref", "type")?,
        comment: require_comment(fields, "external package ref")?,
    })
}

pub fn encode_pkgref_list(pkgrefs: &[ExternalPackageRef]) -> Value {
    Value::Array(pkgrefs.iter().map(encode_pkgref).collect())
}

pub fn decode_pkgref_list(value: &Value) -> Result<Vec<ExternalPackageRef>, ConverterError> {
    let items = value.as_array().ok_or(ConverterError::FieldType {
        entity: "asset metadata",
        field: "extrefs",
        expected: "array",
    })?;
    items.iter().map(decode_pkgref).collect()
}

// --- Checksums ---

/// Checksums travel as a flat pair of keys on the parent record, both
/// directions, never optional.
pub fn encode_checksum(fields: &mut JsonObject, checksum: &Checksum) {
    fields.insert("checksum".to_string(), json!(checksum.value));
    fields.insert(
        "checksumAlgorithm".to_string(),
        json!(checksum.algorithm),
    );
}

pub fn decode_checksum(
    fields: &JsonObject,
    entity: &'static str,
) -> Result<Checksum, ConverterError> {
    Ok(Checksum {
        algorithm: require_str(fields, entity, "checksumAlgorithm")?,
        value: require_str(fields, entity, "checksum")?,
    })
}
