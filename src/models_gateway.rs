//! The gateway-side asset envelope.
//!
//! A `GatewayAsset` is the unit the DBoM gateway stores: a handful of
//! top-level identity fields plus an opaque `assetMetadata` tree holding
//! the full package/review/annotation/snippet/license structure. The
//! metadata tree is kept as raw `serde_json::Value`; its shape is owned
//! by `crate::codec`, not by serde derives, so missing keys surface as
//! typed errors instead of defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Gateway asset classification constants used on export.
pub const ASSET_TYPE: &str = "SoftwareComponent";
pub const ASSET_SUB_TYPE: &str = "BuildArtifact";

/// Placeholder signature. Real signing is out of scope.
pub const UNSIGNED_SIGNATURE: &str = "NOT SIGNED (DEMO)";

/// The gateway's top-level stored unit, one per BoM snapshot.
///
/// `standardVersion` is deliberately NOT defaulted on deserialization:
/// a retrieved asset without it is rejected, matching the gateway
/// contract that every stored asset carries the key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayAsset {
    pub document_name: String,
    pub document_creator: String,
    pub document_created_date: String,
    pub asset_type: String,
    pub asset_sub_type: String,
    pub asset_manufacturer: String,
    pub asset_model_number: String,
    pub asset_description: String,
    pub asset_metadata: Value,
    pub manufacture_signature: String,
    pub standard_version: u32,
}
