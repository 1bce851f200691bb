//! Third-party risk lookup against rugcheck.xyz.
//!
//! The checker is optional: when disabled in configuration it is simply
//! never constructed. Reports are cached for a while so a token that keeps
//! re-alerting does not hammer the rugcheck API.

use crate::hunter::config::RugCheckConfig;
use crate::hunter::endpoint::EndpointClient;
use crate::hunter::feed::RugReport;
use crate::types::RiskFinding;
use moka::future::Cache;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct RugChecker {
    endpoint: EndpointClient,
    base_url: String,
    cache: Cache<String, Vec<RiskFinding>>,
}

impl RugChecker {
    pub fn new(config: &RugCheckConfig) -> Self {
        Self {
            endpoint: EndpointClient::new(config.request_timeout_secs),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(Duration::from_secs(config.cache_ttl_secs))
                .build(),
        }
    }

    /// Fetch the risk findings for a token address.
    ///
    /// `None` means the report was unavailable this time and the caller
    /// proceeds without findings. `Some` with an empty list is an explicit
    /// all-clear, which the notifier surfaces as "no risks found".
    #[instrument(skip(self))]
    pub async fn check(&self, token_address: &str) -> Option<Vec<RiskFinding>> {
        if let Some(cached) = self.cache.get(token_address).await {
            debug!("Rugcheck cache hit for {}", token_address);
            return Some(cached);
        }

        let url = format!("{}/{}/report", self.base_url, token_address);
        let report: RugReport = self.endpoint.fetch_json(&url).await?;

        self.cache
            .insert(token_address.to_string(), report.risks.clone())
            .await;
        Some(report.risks)
    }
}
