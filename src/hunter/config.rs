//! Hunter configuration.
//!
//! All values are read once at startup and treated as immutable for the
//! process lifetime. Defaults mirror the public DexScreener endpoint set.

use nonempty::{nonempty, NonEmpty};
use std::time::Duration;

/// One upstream endpoint description. The poller fans out over every
/// `boosts-latest` entry and resolves the same platform's `get-token`
/// entry for pair-detail lookups.
#[derive(Debug, Clone)]
pub struct DexEndpoint {
    pub platform: String,
    pub name: String,
    pub url: String,
}

impl DexEndpoint {
    pub fn new(platform: &str, name: &str, url: &str) -> Self {
        Self {
            platform: platform.to_string(),
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Complete hunter configuration.
#[derive(Debug, Clone)]
pub struct HunterConfig {
    /// SQLite database location
    pub db_path: String,
    /// Delay between polling cycles, measured from cycle completion
    pub poll_interval_ms: u64,
    /// Per-request HTTP timeout
    pub request_timeout_secs: u64,
    /// Chains the hunter tracks tokens for (compared case-insensitively)
    pub chains_to_track: NonEmpty<String>,
    /// DEX whose pair is selected during enrichment
    pub dex_to_track: String,
    /// Skip tokens whose address carries the pump.fun suffix
    pub ignore_pump_suffix: bool,
    /// Minimum running boost total before an alert fires; None alerts on
    /// every processed steady-state token
    pub min_boost_amount: Option<f64>,
    /// Upper bound on concurrently polled endpoints per cycle
    pub max_concurrent_endpoints: usize,
    /// Request budget for the pair-detail endpoint
    pub detail_requests_per_minute: u32,
    /// Declared upstream endpoints
    pub endpoints: Vec<DexEndpoint>,
    /// Rugcheck settings
    pub rug_check: RugCheckConfig,
}

/// Rugcheck collaborator settings.
#[derive(Debug, Clone)]
pub struct RugCheckConfig {
    /// When false, no rugcheck call is ever made
    pub enabled: bool,
    pub base_url: String,
    /// Rugcheck security analysis can be slow; give it more room than the
    /// market-data endpoints
    pub request_timeout_secs: u64,
    /// How long a fetched report stays fresh for repeat alerts
    pub cache_ttl_secs: u64,
}

impl HunterConfig {
    /// Poll delay as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Whether a feed-reported chain id is in the tracked set.
    pub fn tracks_chain(&self, chain_id: &str) -> bool {
        self.chains_to_track
            .iter()
            .any(|chain| chain.eq_ignore_ascii_case(chain_id))
    }

    /// Resolve an endpoint URL by platform and name.
    pub fn endpoint_url(&self, platform: &str, name: &str) -> Option<&str> {
        self.endpoints
            .iter()
            .find(|ep| ep.platform == platform && ep.name == name)
            .map(|ep| ep.url.as_str())
    }

    /// The endpoints one polling cycle fans out over.
    pub fn boost_endpoints(&self) -> impl Iterator<Item = &DexEndpoint> {
        self.endpoints.iter().filter(|ep| ep.name == "boosts-latest")
    }
}

impl Default for HunterConfig {
    fn default() -> Self {
        Self {
            db_path: "data/boosts.db".to_string(),
            poll_interval_ms: 5_000,
            request_timeout_secs: 10,
            chains_to_track: nonempty!["solana".to_string()],
            dex_to_track: "raydium".to_string(),
            ignore_pump_suffix: false,
            min_boost_amount: None,
            max_concurrent_endpoints: 4,
            detail_requests_per_minute: 300,
            endpoints: vec![
                DexEndpoint::new(
                    "dexscreener",
                    "profiles",
                    "https://api.dexscreener.com/token-profiles/latest/v1",
                ),
                DexEndpoint::new(
                    "dexscreener",
                    "boosts-latest",
                    "https://api.dexscreener.com/token-boosts/latest/v1",
                ),
                DexEndpoint::new(
                    "dexscreener",
                    "boosts-top",
                    "https://api.dexscreener.com/token-boosts/top/v1",
                ),
                DexEndpoint::new(
                    "dexscreener",
                    "get-token",
                    "https://api.dexscreener.com/latest/dex/tokens/",
                ),
            ],
            rug_check: RugCheckConfig::default(),
        }
    }
}

impl Default for RugCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: "https://api.rugcheck.xyz/v1/tokens".to_string(),
            request_timeout_secs: 15,
            cache_ttl_secs: 600,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_tracking_is_case_insensitive() {
        let config = HunterConfig::default();
        assert!(config.tracks_chain("solana"));
        assert!(config.tracks_chain("Solana"));
        assert!(config.tracks_chain("SOLANA"));
        assert!(!config.tracks_chain("ethereum"));
    }

    #[test]
    fn default_endpoints_resolve() {
        let config = HunterConfig::default();
        assert_eq!(config.boost_endpoints().count(), 1);
        assert!(config
            .endpoint_url("dexscreener", "get-token")
            .unwrap()
            .ends_with("/latest/dex/tokens/"));
        assert!(config.endpoint_url("dexscreener", "missing").is_none());
    }
}
