//! Blocking HTTP client for the DBoM gateway's asset endpoints.
//!
//! One request per pipeline run, no retries, no local state beyond the
//! base URL. A non-success status surfaces the status code, the request
//! payload and the response body in a single error value.

use crate::errors::ConverterError;
use crate::models_gateway::GatewayAsset;
use log::{debug, info};
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;

pub struct GatewayClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl GatewayClient {
    pub fn new(base_url: &str) -> Result<Self, ConverterError> {
        let client = reqwest::blocking::Client::builder().build()?;
        Ok(GatewayClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The canonical asset URL, also shown to the user after a create.
    pub fn asset_url(&self, repo: &str, channel: &str, asset_id: &str) -> String {
        format!(
            "{}/api/v1/repo/{}/chan/{}/asset/{}",
            self.base_url, repo, channel, asset_id
        )
    }

    /// POST the asset payload under the given id. Success is 200 or 201.
    pub fn create_asset(
        &self,
        repo: &str,
        channel: &str,
        asset_id: &str,
        asset: &GatewayAsset,
    ) -> Result<(), ConverterError> {
        let url = self.asset_url(repo, channel, asset_id);
        info!("Attempting to contact gateway at {}", self.base_url);
        debug!("POST {}", url);

        let payload = serde_json::to_string(asset)?;
        let response = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .body(payload.clone())
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status == StatusCode::OK || status == StatusCode::CREATED {
            info!("Success Response From Gateway: {}", body);
            Ok(())
        } else {
            Err(ConverterError::Gateway {
                status: status.as_u16(),
                url,
                payload,
                body,
            })
        }
    }

    /// GET the asset with the given id. Success is 200 and a body that
    /// deserializes as a `GatewayAsset` (including `standardVersion`).
    pub fn retrieve_asset(
        &self,
        repo: &str,
        channel: &str,
        asset_id: &str,
    ) -> Result<GatewayAsset, ConverterError> {
        let url = self.asset_url(repo, channel, asset_id);
        info!("Attempting to contact gateway at {}", self.base_url);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if status == StatusCode::OK {
            let asset: GatewayAsset = serde_json::from_str(&body)?;
            info!(
                "Retrieved asset (standardVersion {})",
                asset.standard_version
            );
            Ok(asset)
        } else {
            Err(ConverterError::Gateway {
                status: status.as_u16(),
                url,
                payload: String::new(),
                body,
            })
        }
    }
}
