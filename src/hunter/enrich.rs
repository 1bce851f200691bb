//! Merging a boost observation with the tracked DEX's pair data.

use crate::hunter::feed::{PairDetail, TokenBoost, TokenPairDetails};
use crate::types::BoostedTokenProfile;

/// Pair fields after defaulting. Missing or unparsable upstream values
/// collapse to zero; the name falls back to the token address and the
/// symbol to "N/A".
#[derive(Debug, Clone, PartialEq)]
struct NormalizedPair {
    price_usd: f64,
    liquidity_usd: f64,
    market_cap: f64,
    pair_created_at: i64,
    token_name: String,
    token_symbol: String,
}

fn normalize(pair: &PairDetail, token_address: &str) -> NormalizedPair {
    NormalizedPair {
        price_usd: pair
            .price_usd
            .as_deref()
            .and_then(|price| price.parse().ok())
            .unwrap_or(0.0),
        liquidity_usd: pair
            .liquidity
            .as_ref()
            .and_then(|liquidity| liquidity.usd)
            .unwrap_or(0.0),
        market_cap: pair.market_cap.unwrap_or(0.0),
        pair_created_at: pair.pair_created_at.unwrap_or(0),
        token_name: pair
            .base_token
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| token_address.to_string()),
        token_symbol: pair
            .base_token
            .symbol
            .clone()
            .filter(|symbol| !symbol.is_empty())
            .unwrap_or_else(|| "N/A".to_string()),
    }
}

/// Build the enriched profile for a boost observation.
///
/// Selects the first pair whose `dexId` equals the tracked DEX. Returns
/// `None` when no pair matches: the token is dropped for this cycle and
/// nothing is persisted. `pairs_available` counts every returned pair,
/// matched or not.
pub fn build_profile(
    boost: &TokenBoost,
    details: &TokenPairDetails,
    dex_to_track: &str,
) -> Option<BoostedTokenProfile> {
    let dex_pair = details
        .pairs()
        .iter()
        .find(|pair| pair.dex_id == dex_to_track)?;
    let normalized = normalize(dex_pair, &boost.token_address);

    Some(BoostedTokenProfile {
        url: boost.url.clone(),
        chain_id: boost.chain_id.clone(),
        token_address: boost.token_address.clone(),
        icon: boost.icon.clone(),
        header: boost.header.clone(),
        description: boost.description.clone(),
        links: boost.links.clone(),
        amount: boost.amount,
        amount_total: boost.total_amount,
        pairs_available: details.pairs().len(),
        dex_pair: dex_to_track.to_string(),
        current_price: normalized.price_usd,
        liquidity: normalized.liquidity_usd,
        market_cap: normalized.market_cap,
        pair_created_at: normalized.pair_created_at,
        token_name: normalized.token_name,
        token_symbol: normalized.token_symbol,
    })
}
