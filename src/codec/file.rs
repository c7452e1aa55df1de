//! File and snippet codecs. Each embeds a license block built from the
//! License Codec: files use a `fromFile` license list, snippets use
//! `inSnippet`. Both directions preserve list order.

use crate::errors::ConverterError;
use crate::models_spdx::{SpdxFile, SpdxSnippet};
use serde_json::{Value, json};

use super::entities::{decode_checksum, encode_checksum};
use super::license::{decode_license, decode_license_list, encode_license, encode_license_list};
use super::{JsonObject, as_object, require, require_object, require_str};

pub fn encode_file(file: &SpdxFile) -> Value {
    let mut fields = JsonObject::new();
    fields.insert("name".to_string(), json!(file.name));
    fields.insert("type".to_string(), json!(file.file_type));
    fields.insert("id".to_string(), json!(file.spdx_id));
    fields.insert(
        "license".to_string(),
        json!({
            "comment": file.license_comment,
            "concluded": encode_license(&file.license_concluded),
            "fromFile": encode_license_list(&file.licenses_in_file),
        }),
    );
    fields.insert("copyright".to_string(), json!(file.copyright));
    fields.insert("comment".to_string(), json!(file.comment));
    encode_checksum(&mut fields, &file.checksum);
    Value::Object(fields)
}

pub fn decode_file(value: &Value) -> Result<SpdxFile, ConverterError> {
    let fields = as_object(value, "file", "file")?;
    let license = require_object(fields, "file", "license")?;
    Ok(SpdxFile {
        name: require_str(fields, "file", "name")?,
        file_type: require_str(fields, "file", "type")?,
        spdx_id: require_str(fields, "file", "id")?,
        license_comment: require_str(license, "file license", "comment")?,
        license_concluded: decode_license(require(license, "file license", "concluded")?, "file license")?,
        licenses_in_file: decode_license_list(
            require(license, "file license", "fromFile")?,
            "file license",
        )?,
        copyright: require_str(fields, "file", "copyright")?,
        comment: require_str(fields, "file", "comment")?,
        checksum: decode_checksum(fields, "file")?,
    })
}

pub fn encode_file_list(files: &[SpdxFile]) -> Value {
    Value::Array(files.iter().map(encode_file).collect())
}

pub fn decode_file_list(value: &Value) -> Result<Vec<SpdxFile>, ConverterError> {
    let items = value.as_array().ok_or(ConverterError::FieldType {
        entity: "package",
        field: "files",
        expected: "array",
    })?;
    items.iter().map(decode_file).collect()
}

pub fn encode_snippet(snippet: &SpdxSnippet) -> Value {
    json!({
        "id": snippet.spdx_id,
        "name": snippet.name,
        "comment": snippet.comment,
        "copyright": snippet.copyright,
        "license": {
            "comment": snippet.license_comment,
            "concluded": encode_license(&snippet.license_concluded),
            "inSnippet": encode_license_list(&snippet.licenses_in_snippet),
        },
        "fromFileID": snippet.from_file_id,
    })
}

pub fn decode_snippet(value: &Value) -> Result<SpdxSnippet, ConverterError> {
    let fields = as_object(value, "snippet", "snippet")?;
    let license = require_object(fields, "snippet", "license")?;
    Ok(SpdxSnippet {
        spdx_id: require_str(fields, "snippet", "id")?,
        name: require_str(fields, "snippet", "name")?,
        comment: require_str(fields, "snippet", "comment")?,
        copyright: require_str(fields, "snippet", "copyright")?,
        from_file_id: require_str(fields, "snippet", "fromFileID")?,
        license_comment: require_str(license, "snippet license", "comment")?,
        license_concluded: decode_license(
            require(license, "snippet license", "concluded")?,
            "snippet license",
        )?,
        licenses_in_snippet: decode_license_list(
            require(license, "snippet license", "inSnippet")?,
            "snippet license",
        )?,
    })
}

pub fn encode_snippet_list(snippets: &[SpdxSnippet]) -> Value {
    Value::Array(snippets.iter().map(encode_snippet).collect())
}

pub fn decode_snippet_list(value: &Value) -> Result<Vec<SpdxSnippet>, ConverterError> {
    let items = value.as_array().ok_or(ConverterError::FieldType {
        entity: "asset metadata",
        field: "snippets",
        expected: "array",
    })?;
    items.iter().map(decode_snippet).collect()
}
