//! HTTP client for the Overpass `interpreter` endpoint.
//!
//! Wraps `reqwest` with Overpass-specific request encoding and typed
//! errors. Queries are sent as a form-encoded `data` field in a POST body,
//! which avoids URL length limits on large queries.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::OverpassError;
use crate::types::{ElementBatch, OverpassResponse};

pub const DEFAULT_ENDPOINT: &str = "https://overpass-api.de/api/interpreter";

const DEFAULT_USER_AGENT: &str = "kidspots/0.1 (family-map)";

/// Client for an Overpass API instance.
///
/// Use [`OverpassClient::new`] for the public instance or
/// [`OverpassClient::with_endpoint`] to point at a mirror or a mock server.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: Client,
    endpoint: Url,
}

impl OverpassClient {
    /// Creates a client pointed at the public `overpass-api.de` instance.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64) -> Result<Self, OverpassError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, timeout_secs, DEFAULT_USER_AGENT)
    }

    /// Creates a client for a custom interpreter URL.
    ///
    /// `timeout_secs` bounds the whole request, including reading the body.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::InvalidEndpoint`] if `endpoint` is not an
    /// absolute http(s) URL, or [`OverpassError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn with_endpoint(
        endpoint: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, OverpassError> {
        let url = Url::parse(endpoint).map_err(|e| OverpassError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(OverpassError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            endpoint: url,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Runs an Overpass QL query and decodes the returned elements.
    ///
    /// # Errors
    ///
    /// - [`OverpassError::Http`] on network failure or timeout.
    /// - [`OverpassError::UnexpectedStatus`] on a non-2xx response.
    /// - [`OverpassError::Deserialize`] if the body is not a JSON object
    ///   with an optional `elements` array.
    pub async fn fetch_elements(&self, query: &str) -> Result<ElementBatch, OverpassError> {
        tracing::debug!(endpoint = %self.endpoint, query_len = query.len(), "sending overpass query");

        let response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("data", query)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(OverpassError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: OverpassResponse =
            serde_json::from_str(&body).map_err(|e| OverpassError::Deserialize {
                context: self.endpoint.to_string(),
                source: e,
            })?;

        let batch = ElementBatch::from_response(parsed);
        tracing::debug!(
            elements = batch.elements.len(),
            undecodable = batch.undecodable,
            "overpass response decoded"
        );
        Ok(batch)
    }
}
