//! Client for the signed conversation URL endpoint.

use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{CookingError, Result};

#[derive(Debug, Deserialize)]
struct SignedUrlResponse {
    signed_url: String,
}

/// Obtains signed connection URLs for the voice SDK, so the API key never
/// has to leave the server.
#[derive(Debug, Clone)]
pub struct SignedUrlClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl SignedUrlClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CookingError::gateway("Failed to create HTTP client", e))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }

    /// Request a signed URL for `agent_id`.
    pub async fn signed_url(&self, agent_id: &str) -> Result<String> {
        debug!("Requesting signed conversation URL for agent {agent_id}");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("agent_id", agent_id)])
            .header("xi-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| CookingError::gateway("Failed to reach signed URL endpoint", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(CookingError::Gateway {
                message: format!("signed URL endpoint answered {status}"),
                source: None,
            });
        }

        let body: SignedUrlResponse = response
            .json()
            .await
            .map_err(|e| CookingError::gateway("Malformed signed URL response", e))?;

        Ok(body.signed_url)
    }
}
