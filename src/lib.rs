//! Main library for the SPDX / DBoM gateway bridge.
//!
//! This crate contains the core logic for the bi-directional mapping
//! between SPDX tag-value documents and DBoM gateway assets: parse a
//! tag file and POST it as an asset (export), or GET an asset and write
//! it back out as a tag file (import). Both pipelines are single-shot,
//! synchronous transforms with no shared state.

pub mod codec;
pub mod errors;
pub mod gateway;
pub mod models_gateway;
pub mod models_spdx;
pub mod tagvalue;

use clap::ValueEnum;
use errors::ConverterError;
use gateway::GatewayClient;
use log::info;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

/// Defines the conversion direction.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum ConversionDirection {
    /// Parse an SPDX tag-value file and create a gateway asset
    SpdxToDbom,
    /// Retrieve a gateway asset and write an SPDX tag-value file
    DbomToSpdx,
}

/// Top-level configuration for a conversion run.
#[derive(Debug)]
pub struct Config {
    /// Full gateway address, with scheme.
    pub gateway: String,
    /// Repository ID holding the channel.
    pub repo: String,
    /// Channel ID to commit to / retrieve from.
    pub channel: String,
    pub direction: ConversionDirection,
    /// Tag-value file: input on export, output on import.
    pub file: PathBuf,
    /// Asset ID to retrieve. Import only; export derives the id from
    /// the package SPDX id.
    pub asset: Option<String>,
    /// Optional suffix appended to the asset id as `{id}-{idextra}`.
    pub idextra: Option<String>,
}

impl Config {
    fn asset_id(&self, base: &str) -> String {
        match &self.idextra {
            Some(extra) => format!("{}-{}", base, extra),
            None => base.to_string(),
        }
    }
}

/// The main entry point for the conversion logic.
///
/// Dispatches to the export or import pipeline. Every error is fatal;
/// there is no retry or partial-success path.
pub fn run(config: Config) -> Result<(), ConverterError> {
    info!("Starting conversion: {:?}", config.direction);
    info!("  Gateway: {}", config.gateway);
    info!("  Repo/channel: {}/{}", config.repo, config.channel);

    match config.direction {
        ConversionDirection::SpdxToDbom => run_export(&config),
        ConversionDirection::DbomToSpdx => run_import(&config),
    }
}

/// Export pipeline: tag file -> document -> asset -> POST.
fn run_export(config: &Config) -> Result<(), ConverterError> {
    info!("Attempting to parse file {}", config.file.display());
    let text = std::fs::read_to_string(&config.file).map_err(|e| {
        ConverterError::Io(e, format!("Failed to read {}", config.file.display()))
    })?;
    let document = tagvalue::parse(&text)?;

    info!("Parsing successful. Summary:");
    info!("  Document version: {}", document.version);
    info!("  Package name: {}", document.package.name);
    info!("  Creators:");
    for creator in &document.creation_info.creators {
        info!("    {}", creator.name());
    }

    info!("Creating DBoM asset payload");
    let asset = codec::document::document_to_asset(&document);
    info!("Payload:\n{}", serde_json::to_string_pretty(&asset)?);

    let asset_id = config.asset_id(&document.package.spdx_id);
    info!(
        "Using channel {} on repo {}",
        config.channel, config.repo
    );

    let client = GatewayClient::new(&config.gateway)?;
    client.create_asset(&config.repo, &config.channel, &asset_id, &asset)?;
    info!(
        "You can find the asset at {}",
        client.asset_url(&config.repo, &config.channel, &asset_id)
    );
    Ok(())
}

/// Import pipeline: GET -> asset -> document -> tag file.
fn run_import(config: &Config) -> Result<(), ConverterError> {
    let asset_flag = config.asset.as_deref().ok_or_else(|| {
        ConverterError::Config("--asset is required when importing from the gateway".to_string())
    })?;
    let asset_id = config.asset_id(asset_flag);

    info!(
        "Retrieving asset {} on channel {} on repo {}",
        asset_id, config.channel, config.repo
    );
    let client = GatewayClient::new(&config.gateway)?;
    let asset = client.retrieve_asset(&config.repo, &config.channel, &asset_id)?;

    info!("Rebuilding SPDX document from asset");
    let document = codec::document::asset_to_document(&asset)?;

    info!("Writing tag-value file {}", config.file.display());
    let output = File::create(&config.file).map_err(|e| {
        ConverterError::Io(e, format!("Failed to create {}", config.file.display()))
    })?;
    let mut writer = BufWriter::new(output);
    tagvalue::write_document(&document, &mut writer)?;
    info!("Write complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(asset: Option<&str>, idextra: Option<&str>) -> Config {
        Config {
            gateway: "https://gateway.example".to_string(),
            repo: "repo1".to_string(),
            channel: "chan1".to_string(),
            direction: ConversionDirection::DbomToSpdx,
            file: PathBuf::from("out.spdx"),
            asset: asset.map(String::from),
            idextra: idextra.map(String::from),
        }
    }

    #[test]
    fn test_asset_id_appends_idextra() {
        assert_eq!(config(None, Some("test")).asset_id("pkg"), "pkg-test");
        assert_eq!(config(None, None).asset_id("pkg"), "pkg");
    }

    #[test]
    fn test_import_without_asset_flag_is_config_error() {
        let err = run(config(None, None)).unwrap_err();
        assert!(matches!(err, ConverterError::Config(_)));
    }
}
