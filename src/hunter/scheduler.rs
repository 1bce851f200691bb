//! The polling cycle driver.
//!
//! Two states: idle between cycles, one cycle in flight. A cycle fans out
//! over every declared boosts endpoint, runs the detection pipeline per
//! token, and the next cycle is scheduled a fixed delay after the current
//! one completes, so a slow cycle delays the next one.

use crate::hunter::config::{DexEndpoint, HunterConfig};
use crate::hunter::dedup::{self, BoostDecision};
use crate::hunter::enrich;
use crate::hunter::feed::{BoostFeed, TokenBoost};
use crate::hunter::notifier::BoostNotifier;
use crate::hunter::pacing::DetailPacer;
use crate::hunter::rugcheck::RugChecker;
use crate::hunter::store::BoostStore;
use crate::types::{is_pump_address, CycleKind};
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

/// The boost detection pipeline, wired to its collaborators.
#[derive(Clone)]
pub struct BoostHunter {
    config: Arc<HunterConfig>,
    feed: Arc<dyn BoostFeed>,
    store: Arc<dyn BoostStore>,
    notifier: Arc<dyn BoostNotifier>,
    rug_checker: Option<Arc<RugChecker>>,
    pacer: Arc<DetailPacer>,
}

impl BoostHunter {
    pub fn new(
        config: Arc<HunterConfig>,
        feed: Arc<dyn BoostFeed>,
        store: Arc<dyn BoostStore>,
        notifier: Arc<dyn BoostNotifier>,
        rug_checker: Option<Arc<RugChecker>>,
    ) -> Self {
        let pacer = Arc::new(DetailPacer::new(config.detail_requests_per_minute));
        Self {
            config,
            feed,
            store,
            notifier,
            rug_checker,
            pacer,
        }
    }

    /// Run indefinitely. The first cycle seeds the store without alerting;
    /// every later cycle alerts on new information. Per-token failures are
    /// contained inside the cycle; only a panicking cycle task makes this
    /// return, and the caller is expected to log it and exit.
    pub async fn run(self) -> Result<()> {
        info!("Started. Waiting for tokens...");

        let mut kind = CycleKind::Seed;
        loop {
            self.run_cycle(kind).await?;
            kind = CycleKind::SteadyState;
            sleep(self.config.poll_interval()).await;
        }
    }

    /// One full polling cycle: fan out over every boosts endpoint, bounded
    /// by the configured concurrency limit, and wait for all of them.
    pub async fn run_cycle(&self, kind: CycleKind) -> Result<()> {
        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_endpoints.max(1)));
        let mut tasks = JoinSet::new();

        for endpoint in self.config.boost_endpoints() {
            let endpoint = endpoint.clone();
            let hunter = self.clone();
            let semaphore = Arc::clone(&semaphore);
            tasks.spawn(async move {
                if let Ok(_permit) = semaphore.acquire_owned().await {
                    hunter.poll_endpoint(&endpoint, kind).await;
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            joined.context("Endpoint polling task failed")?;
        }
        Ok(())
    }

    /// Poll one boosts endpoint and run every returned token through the
    /// pipeline. Tokens are processed in feed order; the feed lists each
    /// address at most once, so per-address store operations never race.
    async fn poll_endpoint(&self, endpoint: &DexEndpoint, kind: CycleKind) {
        let Some(boosts) = self.feed.latest_boosts(&endpoint.url).await else {
            info!("No new token boosts received from {}.", endpoint.platform);
            return;
        };

        let detail_url = self
            .config
            .endpoint_url(&endpoint.platform, "get-token")
            .map(str::to_string);

        for boost in boosts {
            self.process_boost(&boost, detail_url.as_deref(), kind).await;
        }
    }

    /// Pipeline for one observation: cheap filters, dedup against the
    /// store, paced enrichment, persistence, and (steady-state, above
    /// threshold) the alert. Any failure is confined to the token at hand.
    async fn process_boost(&self, boost: &TokenBoost, detail_url: Option<&str>, kind: CycleKind) {
        if !self.config.tracks_chain(&boost.chain_id) {
            return;
        }
        if self.config.ignore_pump_suffix && is_pump_address(&boost.token_address) {
            return;
        }

        let stored = match self.store.get(&boost.token_address).await {
            Ok(stored) => stored,
            Err(err) => {
                error!("Store lookup failed for {}: {:?}", boost.token_address, err);
                return;
            }
        };
        if dedup::assess(boost.total_amount, stored.as_ref()) == BoostDecision::Skip {
            return;
        }

        let Some(detail_url) = detail_url else {
            warn!(
                "No get-token endpoint declared; cannot enrich {}",
                boost.token_address
            );
            return;
        };

        self.pacer.until_ready().await;
        let Some(details) = self.feed.token_pairs(detail_url, &boost.token_address).await else {
            return;
        };

        let Some(profile) = enrich::build_profile(boost, &details, &self.config.dex_to_track)
        else {
            debug!(
                "No {} pair for {}; token dropped this cycle",
                self.config.dex_to_track, boost.token_address
            );
            return;
        };

        // A failed upsert suppresses the alert; the unchanged stored total
        // means the token is retried next cycle.
        if let Err(err) = self.store.upsert(&profile).await {
            error!("Store upsert failed for {}: {:?}", profile.token_address, err);
            return;
        }

        if kind == CycleKind::Seed {
            return;
        }
        if let Some(min_total) = self.config.min_boost_amount {
            if profile.amount_total < min_total {
                return;
            }
        }

        let risks = match &self.rug_checker {
            Some(checker) => checker.check(&profile.token_address).await,
            None => None,
        };
        self.notifier.display(&profile, risks.as_deref()).await;
    }
}
