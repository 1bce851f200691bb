//! boost-hunter - DexScreener boost watcher.
//!
//! Polls the token-boosts feed, detects genuinely new or changed boost
//! totals, enriches them with tracked-DEX pair data and emits alerts.

pub mod hunter;
pub mod types;

// Re-export main types for convenience
pub use types::{BoostedTokenProfile, CycleKind, RiskFinding, RiskLevel, StoredBoost};
