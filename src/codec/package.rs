//! The Package Codec: aggregates identity fields, supplier/originator,
//! checksum, the declared/concluded license block and the ordered file
//! list into one flat package record.
//!
//! The package-level license block carries a `declared` key; the
//! file-level block (see `codec::file`) does not. Every field here is
//! required on decode — direct key lookup, no defaults.

use crate::errors::ConverterError;
use crate::models_spdx::{Organization, SpdxPackage};
use serde_json::{Value, json};

use super::entities::{decode_checksum, encode_checksum};
use super::file::{decode_file_list, encode_file_list};
use super::license::{decode_license, decode_license_list, encode_license, encode_license_list};
use super::{JsonObject, as_object, require, require_object, require_str};

pub fn encode_package(package: &SpdxPackage) -> Value {
    let mut fields = JsonObject::new();
    fields.insert("name".to_string(), json!(package.name));
    fields.insert("id".to_string(), json!(package.spdx_id));
    fields.insert("version".to_string(), json!(package.version));
    fields.insert(
        "downloadLocation".to_string(),
        json!(package.download_location),
    );
    fields.insert("summary".to_string(), json!(package.summary));
    fields.insert("sourceInfo".to_string(), json!(package.source_info));
    fields.insert("fileName".to_string(), json!(package.file_name));
    fields.insert("supplierName".to_string(), json!(package.supplier.name));
    fields.insert("supplierEmail".to_string(), json!(package.supplier.email));
    fields.insert(
        "originatorName".to_string(),
        json!(package.originator.name),
    );
    fields.insert(
        "originatorEmail".to_string(),
        json!(package.originator.email),
    );
    encode_checksum(&mut fields, &package.checksum);
    fields.insert(
        "verificationCode".to_string(),
        json!(package.verification_code),
    );
    fields.insert("description".to_string(), json!(package.description));
    fields.insert("comment".to_string(), json!(package.comment));
    fields.insert("copyright".to_string(), json!(package.copyright));
    fields.insert(
        "license".to_string(),
        json!({
            "comment": package.license_comment,
            "declared": encode_license(&package.license_declared),
            "concluded": encode_license(&package.license_concluded),
            "fromFile": encode_license_list(&package.licenses_from_files),
        }),
    );
    fields.insert("files".to_string(), encode_file_list(&package.files));
    Value::Object(fields)
}

/// Decode a package record. External refs travel outside the package
/// object (under the metadata `extrefs` key) and are attached by the
/// Document Codec; the list decodes empty here.
pub fn decode_package(value: &Value) -> Result<SpdxPackage, ConverterError> {
    let fields = as_object(value, "package", "package")?;
    let license = require_object(fields, "package", "license")?;
    Ok(SpdxPackage {
        name: require_str(fields, "package", "name")?,
        spdx_id: require_str(fields, "package", "id")?,
        version: require_str(fields, "package", "version")?,
        download_location: require_str(fields, "package", "downloadLocation")?,
        summary: require_str(fields, "package", "summary")?,
        source_info: require_str(fields, "package", "sourceInfo")?,
        file_name: require_str(fields, "package", "fileName")?,
        supplier: Organization {
            name: require_str(fields, "package", "supplierName")?,
            email: require_str(fields, "package", "supplierEmail")?,
        },
        originator: Organization {
            name: require_str(fields, "package", "originatorName")?,
            email: require_str(fields, "package", "originatorEmail")?,
        },
        checksum: decode_checksum(fields, "package")?,
        verification_code: require_str(fields, "package", "verificationCode")?,
        description: require_str(fields, "package", "description")?,
        comment: require_str(fields, "package", "comment")?,
        copyright: require_str(fields, "package", "copyright")?,
        license_comment: require_str(license, "package license", "comment")?,
        license_declared: decode_license(
            require(license, "package license", "declared")?,
            "package license",
        )?,
        license_concluded: decode_license(
            require(license, "package license", "concluded")?,
            "package license",
        )?,
        licenses_from_files: decode_license_list(
            require(license, "package license", "fromFile")?,
            "package license",
        )?,
        external_refs: Vec::new(),
        files: decode_file_list(require(fields, "package", "files")?)?,
    })
}
