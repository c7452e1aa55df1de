//! The Document Codec: the top of the mapping. Combines creation info,
//! reviews, annotations, snippets, external refs and the package into a
//! `GatewayAsset`, and back.
//!
//! The top-level split is fixed wire format: `documentName`,
//! `documentCreator` and `documentCreatedDate` (plus the constant asset
//! classification fields) live on the asset envelope, while `package`,
//! `id`, `namespace`, `comment`, `dataLicense`, `reviews`, `extrefs`,
//! `annotations` and `snippets` nest inside `assetMetadata`.

use crate::errors::ConverterError;
use crate::models_gateway::{ASSET_SUB_TYPE, ASSET_TYPE, GatewayAsset, UNSIGNED_SIGNATURE};
use crate::models_spdx::{CreationInfo, Creator, SpdxDocument};
use serde_json::json;

use super::entities::{
    decode_annotation_list, decode_pkgref_list, decode_review_list, encode_annotation_list,
    encode_pkgref_list, encode_review_list,
};
use super::file::{decode_snippet_list, encode_snippet_list};
use super::identity::{decode_creators, encode_creators};
use super::license::{decode_license, encode_license};
use super::package::{decode_package, encode_package};
use super::{as_object, format_created, parse_created, require, require_str};

/// The version stamped onto imported documents. Export does not re-derive
/// it from the asset; the parsed document's own version is used there for
/// display only.
pub const IMPORT_SPDX_VERSION: &str = "SPDX-2.1";

/// Build the gateway asset payload for a parsed SPDX document.
pub fn document_to_asset(document: &SpdxDocument) -> GatewayAsset {
    let package = &document.package;
    let metadata = json!({
        "reviews": encode_review_list(&document.reviews),
        // Flat summary of the declared license; never read on import.
        "license": package.license_declared.identifier(),
        "extrefs": encode_pkgref_list(&package.external_refs),
        "package": encode_package(package),
        "id": document.spdx_id,
        "namespace": document.namespace,
        "comment": document.comment,
        "dataLicense": encode_license(&document.data_license),
        "annotations": encode_annotation_list(&document.annotations),
        "snippets": encode_snippet_list(&document.snippets),
    });

    GatewayAsset {
        document_name: document.name.clone(),
        document_creator: encode_creators(&document.creation_info.creators),
        document_created_date: format_created(&document.creation_info.created),
        asset_type: ASSET_TYPE.to_string(),
        asset_sub_type: ASSET_SUB_TYPE.to_string(),
        asset_manufacturer: format!("{} [{}]", package.originator.name, package.supplier.name),
        asset_model_number: package.version.clone(),
        asset_description: package.description.clone(),
        asset_metadata: metadata,
        manufacture_signature: UNSIGNED_SIGNATURE.to_string(),
        standard_version: 1,
    }
}

/// Rebuild an SPDX document from a retrieved gateway asset.
pub fn asset_to_document(asset: &GatewayAsset) -> Result<SpdxDocument, ConverterError> {
    let metadata = as_object(&asset.asset_metadata, "asset", "assetMetadata")?;

    let (person, organization, tool) = decode_creators(&asset.document_creator)?;
    let creation_info = CreationInfo {
        created: parse_created(&asset.document_created_date, "documentCreatedDate")?,
        creators: vec![
            Creator::Person(person),
            Creator::Organization(organization),
            Creator::Tool(tool),
        ],
    };

    let mut package = decode_package(require(metadata, "asset metadata", "package")?)?;
    package.external_refs = decode_pkgref_list(require(metadata, "asset metadata", "extrefs")?)?;

    Ok(SpdxDocument {
        version: IMPORT_SPDX_VERSION.to_string(),
        data_license: decode_license(
            require(metadata, "asset metadata", "dataLicense")?,
            "asset metadata",
        )?,
        name: asset.document_name.clone(),
        spdx_id: require_str(metadata, "asset metadata", "id")?,
        namespace: require_str(metadata, "asset metadata", "namespace")?,
        comment: require_str(metadata, "asset metadata", "comment")?,
        creation_info,
        reviews: decode_review_list(require(metadata, "asset metadata", "reviews")?)?,
        annotations: decode_annotation_list(require(metadata, "asset metadata", "annotations")?)?,
        package,
        snippets: decode_snippet_list(require(metadata, "asset metadata", "snippets")?)?,
    })
}
