//! Main entry point for the boost hunter.

use anyhow::{Context, Result};
use boost_hunter::hunter::{
    BoostHunter, ConsoleNotifier, EndpointClient, HunterConfig, RugChecker, SqliteBoostStore,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let config = Arc::new(HunterConfig::default());
    info!(
        "Tracking {} chain(s) on {} via {} endpoint(s)",
        config.chains_to_track.len(),
        config.dex_to_track,
        config.endpoints.len()
    );

    if let Some(parent) = Path::new(&config.db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).context("Failed to create database directory")?;
        }
    }

    let store = Arc::new(SqliteBoostStore::connect(&config.db_path).await?);
    let feed = Arc::new(EndpointClient::new(config.request_timeout_secs));
    let rug_checker = config
        .rug_check
        .enabled
        .then(|| Arc::new(RugChecker::new(&config.rug_check)));

    let hunter = BoostHunter::new(
        Arc::clone(&config),
        feed,
        store,
        Arc::new(ConsoleNotifier),
        rug_checker,
    );

    // The loop only returns on a fatal error; log it before exiting.
    if let Err(err) = hunter.run().await {
        error!("Hunter terminated: {:?}", err);
        return Err(err);
    }
    Ok(())
}
