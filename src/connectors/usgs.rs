//! REST client for the USGS earthquake GeoJSON summary feeds.
//!
//! All data fetched here is raw and must be normalized through the
//! events layer before use.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::feeds::{FeedWindow, DEFAULT_FEED_BASE_URL};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("feed returned HTTP status {status}")]
    Status { status: u16 },

    #[error("failed to parse feed response: {0}")]
    Parse(String),
}

/// USGS feed client for REST operations.
#[derive(Clone)]
pub struct UsgsClient {
    client: Client,
    base_url: String,
}

impl UsgsClient {
    /// Creates a new client against the default USGS endpoints.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_FEED_BASE_URL.to_string())
    }

    /// Creates a new client against a custom base URL (used by tests and
    /// local mirrors).
    pub fn with_base_url(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }

    /// Fetches the raw feed document for a window.
    ///
    /// Any non-success status, transport failure, or undecodable body is
    /// reported as a [`FetchError`]; degrading to an empty event list is
    /// the caller's responsibility.
    pub async fn fetch_feed(&self, window: FeedWindow) -> Result<FeedDocument, FetchError> {
        let url = window.endpoint_url(&self.base_url);
        debug!("[{}] GET {}", window, url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                status: response.status().as_u16(),
            });
        }

        let document: FeedDocument = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        debug!(
            "[{}] feed returned {} features",
            window,
            document.features.len()
        );

        Ok(document)
    }

    /// Returns the configured feed base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl Default for UsgsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UsgsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UsgsClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

// ============ Response Types ============

/// Top-level GeoJSON feed document.
///
/// An absent `features` list deserializes as empty rather than failing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedDocument {
    #[serde(default)]
    pub features: Vec<RawFeature>,
    #[serde(default)]
    pub metadata: Option<FeedMetadata>,
}

/// Feed metadata block (informational only).
#[derive(Debug, Clone, Deserialize)]
pub struct FeedMetadata {
    pub generated: Option<i64>,
    pub title: Option<String>,
    pub count: Option<u64>,
}

/// A single provider-specific event record, prior to normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeature {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub properties: RawProperties,
    #[serde(default)]
    pub geometry: Option<RawGeometry>,
}

/// Event attributes consumed from the provider record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProperties {
    /// Occurrence time in epoch milliseconds.
    pub time: Option<i64>,
    pub mag: Option<f64>,
    pub place: Option<String>,
    pub url: Option<String>,
}

/// Point geometry with positional `[lon, lat, depth_km]` coordinates.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeometry {
    #[serde(default)]
    pub coordinates: Vec<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_document_without_features_is_empty() {
        let document: FeedDocument = serde_json::from_str(r#"{"type":"FeatureCollection"}"#)
            .expect("document without features must still parse");
        assert!(document.features.is_empty());
    }

    #[test]
    fn test_feature_parses_with_missing_fields() {
        let json = r#"{
            "id": "us7000abcd",
            "properties": {"time": 1700000000000, "place": "10km N of Somewhere"},
            "geometry": {"coordinates": [-122.5, 37.8, 8.2]}
        }"#;

        let feature: RawFeature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.id, "us7000abcd");
        assert_eq!(feature.properties.time, Some(1_700_000_000_000));
        assert_eq!(feature.properties.mag, None);
        assert_eq!(
            feature.geometry.unwrap().coordinates,
            vec![-122.5, 37.8, 8.2]
        );
    }

    #[tokio::test]
    async fn test_fetch_feed_reports_transport_failure() {
        // Port 9 (discard) is closed; the request must fail fast with a
        // transport error, not a panic.
        let client = UsgsClient::with_base_url("http://127.0.0.1:9".to_string());
        let result = client.fetch_feed(FeedWindow::Hour).await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }
}
