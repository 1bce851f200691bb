//! Upstream feed contract and wire types.
//!
//! Shapes follow the DexScreener boosts/pair endpoints and the rugcheck
//! report endpoint. Fields the pipeline never reads are not modeled.

use crate::types::{RiskFinding, TokenLink};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One observation from the token-boosts feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBoost {
    #[serde(default)]
    pub url: String,
    pub chain_id: String,
    pub token_address: String,
    pub icon: Option<String>,
    pub header: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<TokenLink>>,
    /// Boosts added by this observation
    #[serde(default)]
    pub amount: f64,
    /// Running boost total for the token
    #[serde(default)]
    pub total_amount: f64,
}

/// Response from the pair-detail endpoint for one token address.
///
/// The feed reports `pairs: null` for tokens it has no pairs for, so the
/// field stays optional and [`TokenPairDetails::pairs`] papers over it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenPairDetails {
    pairs: Option<Vec<PairDetail>>,
}

impl TokenPairDetails {
    pub fn new(pairs: Vec<PairDetail>) -> Self {
        Self { pairs: Some(pairs) }
    }

    pub fn pairs(&self) -> &[PairDetail] {
        self.pairs.as_deref().unwrap_or_default()
    }
}

/// One tradable pair entry from the detail endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairDetail {
    #[serde(default)]
    pub dex_id: String,
    #[serde(default)]
    pub base_token: BaseToken,
    /// Price comes over the wire as a decimal string
    pub price_usd: Option<String>,
    pub liquidity: Option<PairLiquidity>,
    pub market_cap: Option<f64>,
    /// Epoch milliseconds
    pub pair_created_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BaseToken {
    pub name: Option<String>,
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PairLiquidity {
    pub usd: Option<f64>,
}

/// Rugcheck token report. Only the risks array matters here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RugReport {
    #[serde(default)]
    pub risks: Vec<RiskFinding>,
}

/// The upstream market-data feed as the scheduler sees it.
///
/// Absence (`None`) means "no data this cycle": transport failures, bad
/// statuses and undecodable bodies are all collapsed into it by the
/// implementation. The next polling cycle is the retry.
#[async_trait]
pub trait BoostFeed: Send + Sync {
    /// Fetch the current boosted-token list from a boosts endpoint.
    async fn latest_boosts(&self, url: &str) -> Option<Vec<TokenBoost>>;

    /// Fetch pair details for one token, given the detail base URL.
    async fn token_pairs(&self, base_url: &str, token_address: &str) -> Option<TokenPairDetails>;
}
