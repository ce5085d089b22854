use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};

use crate::{
    domain::models::{GeolocationData, GeolocationEntry},
    ports::geolocation::GeolocationLookup,
};

pub const DEFAULT_POSITION_STACK_URL: &str = "http://api.positionstack.com";

/// Why a forward lookup produced nothing
#[derive(Debug, Error)]
enum LookupError {
    #[error("The PositionStack API key is not set.")]
    MissingAccessKey,

    #[error("The PositionStack API request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("The PositionStack API returned an error: {0}")]
    Status(reqwest::StatusCode),

    #[error("The PositionStack API response could not be decoded: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("The PositionStack API returned no results.")]
    NoResults,

    #[error("The PositionStack API request was cancelled.")]
    Cancelled,
}

#[derive(Debug, Deserialize)]
struct ForwardResponse {
    #[serde(default)]
    data: Vec<ForwardResult>,
}

#[derive(Debug, Deserialize)]
struct ForwardResult {
    latitude: Option<f64>,
    longitude: Option<f64>,
    #[serde(rename = "type")]
    kind: Option<String>,
    locality: Option<String>,
    region: Option<String>,
    country: Option<String>,
}

impl ForwardResult {
    /// Rows without coordinates carry nothing worth returning
    fn into_entry(self, address: &str) -> Option<GeolocationEntry> {
        Some(GeolocationEntry {
            address: address.to_string(),
            latitude: self.latitude?,
            longitude: self.longitude?,
            kind: self.kind,
            locality: self.locality,
            region: self.region,
            country: self.country,
        })
    }
}

/// Geolocation lookup backed by the PositionStack forward geocoding API
#[derive(Clone)]
pub struct PositionStackGeolocationLookup {
    client: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
}

impl PositionStackGeolocationLookup {
    pub fn new(
        base_url: impl Into<String>,
        access_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, base_url, access_key))
    }

    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        access_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_key,
        }
    }

    async fn forward(&self, address: &str) -> Result<GeolocationData, LookupError> {
        let access_key = self
            .access_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(LookupError::MissingAccessKey)?;

        let response = self
            .client
            .get(format!("{}/v1/forward", self.base_url))
            .query(&[("access_key", access_key), ("query", address)])
            .send()
            .await
            .map_err(LookupError::Request)?;

        if !response.status().is_success() {
            return Err(LookupError::Status(response.status()));
        }

        let body: ForwardResponse = response.json().await.map_err(LookupError::Decode)?;

        let entries = body
            .data
            .into_iter()
            .filter_map(|row| row.into_entry(address))
            .collect();

        GeolocationData::from_entries(entries).ok_or(LookupError::NoResults)
    }
}

#[async_trait]
impl GeolocationLookup for PositionStackGeolocationLookup {
    async fn resolve(
        &self,
        address: &str,
        cancel: &CancellationToken,
    ) -> Option<GeolocationData> {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(LookupError::Cancelled),
            result = self.forward(address) => result,
        };

        match result {
            Ok(data) => {
                debug!("Resolved {} locations for '{}'", data.len(), address);
                Some(data)
            }
            Err(err @ LookupError::Cancelled) => {
                warn!("{}", err);
                None
            }
            Err(err) => {
                error!("{}", err);
                None
            }
        }
    }
}
