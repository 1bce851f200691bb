//! Core types and data structures for the boost-hunter system.

use serde::{Deserialize, Serialize};

/// A social/community link attached to a boosted token listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenLink {
    /// Link kind reported by the feed (e.g. "twitter", "telegram")
    #[serde(rename = "type")]
    pub kind: Option<String>,
    /// Display label, when the feed provides one
    pub label: Option<String>,
    pub url: Option<String>,
}

/// Severity of a single rugcheck finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Serious red flag for the token contract
    Danger,
    /// Suspicious but not conclusive
    Warn,
    /// Any level the feed reports that we do not classify
    #[serde(other)]
    Other,
}

/// A single heuristic risk finding for a token contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFinding {
    pub name: String,
    pub description: String,
    pub level: RiskLevel,
}

/// Which kind of polling cycle is in flight.
///
/// The very first cycle only seeds the store with the already-boosted
/// population; alerts start from the second cycle onward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleKind {
    /// First cycle after startup: upsert everything, alert on nothing
    Seed,
    /// Every later cycle: upsert and alert on new/changed boosts
    SteadyState,
}

/// The persisted dedup state for one token address.
///
/// At most one row exists per address; `amount_total` is the last boost
/// total we recorded and is the sole input to the new-information check.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredBoost {
    pub token_address: String,
    pub amount_total: f64,
}

/// A fully enriched boosted-token record: the boost observation merged with
/// the tracked DEX pair's market data. This is what gets persisted and what
/// the notifier renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoostedTokenProfile {
    pub url: String,
    pub chain_id: String,
    pub token_address: String,
    pub icon: Option<String>,
    pub header: Option<String>,
    pub description: Option<String>,
    pub links: Option<Vec<TokenLink>>,
    /// Boosts added by the observation that triggered this record
    pub amount: f64,
    /// Running boost total for the token
    pub amount_total: f64,
    /// Total number of pairs the detail endpoint returned for the token
    pub pairs_available: usize,
    /// The DEX identifier whose pair was selected
    pub dex_pair: String,
    pub current_price: f64,
    pub liquidity: f64,
    pub market_cap: f64,
    /// Pair creation time in epoch milliseconds, 0 when unknown
    pub pair_created_at: i64,
    pub token_name: String,
    pub token_symbol: String,
}

impl BoostedTokenProfile {
    /// True for pump.fun-style mint addresses (ends in "pump").
    pub fn is_pump_fun(&self) -> bool {
        is_pump_address(&self.token_address)
    }
}

/// Address check shared by the pre-filter and the alert renderer.
pub fn is_pump_address(address: &str) -> bool {
    address.trim().to_lowercase().ends_with("pump")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_address_detection() {
        assert!(is_pump_address("Gh9ZwEmdLJ8DscKNTkTqPbNwLNNBjuSzaG9Vp2KGpump"));
        assert!(is_pump_address("  ABCpump  "));
        assert!(is_pump_address("abcPUMP"));
        assert!(!is_pump_address("So11111111111111111111111111111111111111112"));
    }

    #[test]
    fn risk_level_parses_unknown_levels() {
        let finding: RiskFinding = serde_json::from_str(
            r#"{"name":"Low Liquidity","description":"Liquidity is low","level":"info"}"#,
        )
        .unwrap();
        assert_eq!(finding.level, RiskLevel::Other);

        let finding: RiskFinding = serde_json::from_str(
            r#"{"name":"Freeze Authority","description":"Freeze authority enabled","level":"danger"}"#,
        )
        .unwrap();
        assert_eq!(finding.level, RiskLevel::Danger);
    }
}
