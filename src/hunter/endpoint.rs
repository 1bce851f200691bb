//! HTTP endpoint access.
//!
//! One timed GET per call, no internal retries; the polling cycle is the
//! retry cadence. Every failure mode is classified, logged, and collapsed
//! into absence so callers treat it as "no new data this cycle".

use crate::hunter::feed::{BoostFeed, TokenBoost, TokenPairDetails};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{instrument, warn};

/// Why a fetch produced no data. All variants are transient from the
/// pipeline's point of view; the distinction only feeds the log line.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("empty response body")]
    EmptyBody,

    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Thin JSON-over-GET client shared by the boost, pair-detail and rugcheck
/// lookups.
#[derive(Debug, Clone)]
pub struct EndpointClient {
    client: Client,
    timeout: Duration,
}

impl EndpointClient {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// GET a JSON document, collapsing every failure into `None`.
    #[instrument(skip(self))]
    pub async fn fetch_json<T: DeserializeOwned>(&self, url: &str) -> Option<T> {
        match self.try_fetch(url).await {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("GET {} yielded no data: {}", url, err);
                None
            }
        }
    }

    async fn try_fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    FetchError::Timeout
                } else {
                    FetchError::Transport(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|err| FetchError::Transport(err.to_string()))?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        serde_json::from_str(&body).map_err(|err| FetchError::Decode(err.to_string()))
    }
}

#[async_trait]
impl BoostFeed for EndpointClient {
    async fn latest_boosts(&self, url: &str) -> Option<Vec<TokenBoost>> {
        self.fetch_json(url).await
    }

    async fn token_pairs(&self, base_url: &str, token_address: &str) -> Option<TokenPairDetails> {
        let url = format!("{}{}", base_url, token_address);
        self.fetch_json(&url).await
    }
}
