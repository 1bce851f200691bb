//! End-to-end polling cycle tests: stub feed, in-memory store, recording
//! notifier.

use async_trait::async_trait;
use boost_hunter::hunter::feed::{BaseToken, PairDetail, PairLiquidity};
use boost_hunter::hunter::{
    BoostFeed, BoostHunter, BoostNotifier, BoostStore, DexEndpoint, HunterConfig,
    SqliteBoostStore, TokenBoost, TokenPairDetails,
};
use boost_hunter::types::{BoostedTokenProfile, CycleKind, RiskFinding};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Feed stub with canned responses and call counters.
struct StubFeed {
    boosts: Mutex<Option<Vec<TokenBoost>>>,
    pairs: HashMap<String, TokenPairDetails>,
    detail_calls: AtomicUsize,
}

impl StubFeed {
    fn new(boosts: Option<Vec<TokenBoost>>, pairs: HashMap<String, TokenPairDetails>) -> Self {
        Self {
            boosts: Mutex::new(boosts),
            pairs,
            detail_calls: AtomicUsize::new(0),
        }
    }

    fn set_boosts(&self, boosts: Vec<TokenBoost>) {
        *self.boosts.lock().unwrap() = Some(boosts);
    }

    fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoostFeed for StubFeed {
    async fn latest_boosts(&self, _url: &str) -> Option<Vec<TokenBoost>> {
        self.boosts.lock().unwrap().clone()
    }

    async fn token_pairs(&self, _base_url: &str, token_address: &str) -> Option<TokenPairDetails> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.pairs.get(token_address).cloned()
    }
}

/// Store wrapper that counts upserts.
struct CountingStore {
    inner: SqliteBoostStore,
    upserts: AtomicUsize,
}

impl CountingStore {
    async fn in_memory() -> Self {
        Self {
            inner: SqliteBoostStore::in_memory()
                .await
                .expect("Failed to open in-memory store"),
            upserts: AtomicUsize::new(0),
        }
    }

    fn upserts(&self) -> usize {
        self.upserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BoostStore for CountingStore {
    async fn get(&self, token_address: &str) -> anyhow::Result<Option<boost_hunter::StoredBoost>> {
        self.inner.get(token_address).await
    }

    async fn upsert(&self, profile: &BoostedTokenProfile) -> anyhow::Result<()> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        self.inner.upsert(profile).await
    }

    async fn record_count(&self) -> anyhow::Result<i64> {
        self.inner.record_count().await
    }
}

/// Notifier that records instead of printing.
#[derive(Default)]
struct RecordingNotifier {
    alerts: Mutex<Vec<(BoostedTokenProfile, Option<Vec<RiskFinding>>)>>,
}

impl RecordingNotifier {
    fn alerts(&self) -> Vec<(BoostedTokenProfile, Option<Vec<RiskFinding>>)> {
        self.alerts.lock().unwrap().clone()
    }
}

#[async_trait]
impl BoostNotifier for RecordingNotifier {
    async fn display(&self, profile: &BoostedTokenProfile, risks: Option<&[RiskFinding]>) {
        self.alerts
            .lock()
            .unwrap()
            .push((profile.clone(), risks.map(|findings| findings.to_vec())));
    }
}

fn boost(address: &str, chain: &str, total: f64) -> TokenBoost {
    TokenBoost {
        url: format!("https://dexscreener.com/{}/{}", chain, address),
        chain_id: chain.to_string(),
        token_address: address.to_string(),
        icon: None,
        header: None,
        description: None,
        links: None,
        amount: 10.0,
        total_amount: total,
    }
}

fn pair(dex_id: &str, price: &str) -> PairDetail {
    PairDetail {
        dex_id: dex_id.to_string(),
        base_token: BaseToken {
            name: Some("Test Token".to_string()),
            symbol: Some("TST".to_string()),
        },
        price_usd: Some(price.to_string()),
        liquidity: Some(PairLiquidity { usd: Some(25_000.0) }),
        market_cap: Some(1_000_000.0),
        pair_created_at: Some(1_700_000_000_000),
    }
}

fn test_config() -> HunterConfig {
    let mut config = HunterConfig::default();
    config.rug_check.enabled = false;
    config.endpoints = vec![
        DexEndpoint::new("dexscreener", "boosts-latest", "stub://boosts"),
        DexEndpoint::new("dexscreener", "get-token", "stub://tokens/"),
    ];
    config
}

struct Harness {
    hunter: BoostHunter,
    feed: Arc<StubFeed>,
    store: Arc<CountingStore>,
    notifier: Arc<RecordingNotifier>,
}

async fn harness(config: HunterConfig, feed: StubFeed) -> Harness {
    let feed = Arc::new(feed);
    let store = Arc::new(CountingStore::in_memory().await);
    let notifier = Arc::new(RecordingNotifier::default());
    let hunter = BoostHunter::new(
        Arc::new(config),
        feed.clone(),
        store.clone(),
        notifier.clone(),
        None,
    );
    Harness {
        hunter,
        feed,
        store,
        notifier,
    }
}

#[tokio::test]
async fn seed_cycle_upserts_but_never_alerts() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("raydium", "1.23")]))]);
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::Seed).await.unwrap();

    assert_eq!(h.store.upserts(), 1);
    assert!(h.notifier.alerts().is_empty());
    let stored = h.store.get("abc").await.unwrap().unwrap();
    assert_eq!(stored.amount_total, 500.0);
}

#[tokio::test]
async fn unchanged_feed_is_idempotent_across_cycles() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("raydium", "1.23")]))]);
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::Seed).await.unwrap();
    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    // Second pass sees the same total: no second upsert, no alert, and no
    // second detail lookup either.
    assert_eq!(h.store.upserts(), 1);
    assert_eq!(h.feed.detail_calls(), 1);
    assert!(h.notifier.alerts().is_empty());
}

#[tokio::test]
async fn steady_state_alert_carries_enriched_fields() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("raydium", "1.23")]))]);
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.store.upserts(), 1);
    let alerts = h.notifier.alerts();
    assert_eq!(alerts.len(), 1);
    let (profile, risks) = &alerts[0];
    assert_eq!(profile.current_price, 1.23);
    assert_eq!(profile.amount_total, 500.0);
    assert_eq!(profile.token_name, "Test Token");
    assert!(risks.is_none());
}

#[tokio::test]
async fn untracked_chain_never_reaches_the_detail_endpoint() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("raydium", "1.23")]))]);
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "ethereum", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.feed.detail_calls(), 0);
    assert_eq!(h.store.upserts(), 0);
    assert!(h.notifier.alerts().is_empty());
}

#[tokio::test]
async fn token_without_tracked_dex_pair_is_dropped() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("orca", "1.23")]))]);
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.feed.detail_calls(), 1);
    assert_eq!(h.store.upserts(), 0);
    assert!(h.notifier.alerts().is_empty());
}

#[tokio::test]
async fn changed_totals_reprocess_in_both_directions() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("raydium", "1.23")]))]);
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::Seed).await.unwrap();

    h.feed.set_boosts(vec![boost("abc", "solana", 510.0)]);
    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    // A decreased total is still a change and is reprocessed.
    h.feed.set_boosts(vec![boost("abc", "solana", 490.0)]);
    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.store.upserts(), 3);
    assert_eq!(h.notifier.alerts().len(), 2);
    let stored = h.store.get("abc").await.unwrap().unwrap();
    assert_eq!(stored.amount_total, 490.0);
}

#[tokio::test]
async fn alert_threshold_gates_the_notifier_not_the_store() {
    let pairs = HashMap::from([("abc".to_string(), TokenPairDetails::new(vec![pair("raydium", "1.23")]))]);
    let mut config = test_config();
    config.min_boost_amount = Some(1_000.0);
    let h = harness(
        config,
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.store.upserts(), 1);
    assert!(h.notifier.alerts().is_empty());
}

#[tokio::test]
async fn pump_suffix_rule_skips_before_any_lookup() {
    let pairs = HashMap::from([(
        "abcpump".to_string(),
        TokenPairDetails::new(vec![pair("raydium", "1.23")]),
    )]);
    let mut config = test_config();
    config.ignore_pump_suffix = true;
    let h = harness(
        config,
        StubFeed::new(Some(vec![boost("abcpump", "solana", 500.0)]), pairs),
    )
    .await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.feed.detail_calls(), 0);
    assert_eq!(h.store.upserts(), 0);
    assert!(h.notifier.alerts().is_empty());
}

#[tokio::test]
async fn absent_boosts_feed_leaves_everything_untouched() {
    let h = harness(test_config(), StubFeed::new(None, HashMap::new())).await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.feed.detail_calls(), 0);
    assert_eq!(h.store.upserts(), 0);
    assert!(h.notifier.alerts().is_empty());
    assert_eq!(h.store.record_count().await.unwrap(), 0);
}

#[tokio::test]
async fn absent_detail_feed_skips_the_token_for_this_cycle() {
    // No pair details available for abc at all.
    let h = harness(
        test_config(),
        StubFeed::new(Some(vec![boost("abc", "solana", 500.0)]), HashMap::new()),
    )
    .await;

    h.hunter.run_cycle(CycleKind::SteadyState).await.unwrap();

    assert_eq!(h.feed.detail_calls(), 1);
    assert_eq!(h.store.upserts(), 0);
    assert!(h.notifier.alerts().is_empty());
}
