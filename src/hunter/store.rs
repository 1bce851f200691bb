//! Persistent boost state.
//!
//! The store is the single source of truth for "have we seen this total
//! before": one row per token address, updated in place, never deleted.

use crate::types::{BoostedTokenProfile, StoredBoost};
use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, FromRow, Pool, Sqlite};
use tracing::{debug, info};

/// Contract for boost-state persistence.
#[async_trait]
pub trait BoostStore: Send + Sync {
    /// Point lookup of the last recorded state for a token address.
    async fn get(&self, token_address: &str) -> Result<Option<StoredBoost>>;

    /// Insert or update the full profile, keyed uniquely by token address.
    async fn upsert(&self, profile: &BoostedTokenProfile) -> Result<()>;

    /// Total number of tracked tokens.
    async fn record_count(&self) -> Result<i64>;
}

/// Helper type for deserializing the dedup state from SQLite.
#[derive(FromRow)]
struct StoredBoostRow {
    token_address: String,
    amount_total: f64,
}

/// SQLite implementation of [`BoostStore`].
pub struct SqliteBoostStore {
    pool: Pool<Sqlite>,
}

impl SqliteBoostStore {
    /// Open (or create) the database file and ensure the schema exists.
    pub async fn connect(db_path: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .context("Failed to connect to SQLite database")?;

        Self::create_schema(&pool).await?;
        info!("Boost store connected to {}", db_path);

        Ok(Self { pool })
    }

    /// In-memory store for tests. A single connection keeps every query on
    /// the same ephemeral database.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .context("Failed to open in-memory SQLite database")?;

        Self::create_schema(&pool).await?;
        Ok(Self { pool })
    }

    async fn create_schema(pool: &Pool<Sqlite>) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS boosted_tokens (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                token_address TEXT NOT NULL UNIQUE,
                chain_id TEXT NOT NULL,
                url TEXT NOT NULL,
                icon TEXT,
                header TEXT,
                description TEXT,
                links TEXT NOT NULL,
                amount REAL NOT NULL,
                amount_total REAL NOT NULL,
                pairs_available INTEGER NOT NULL,
                dex_pair TEXT NOT NULL,
                current_price REAL NOT NULL,
                liquidity REAL NOT NULL,
                market_cap REAL NOT NULL,
                pair_created_at INTEGER NOT NULL,
                token_name TEXT NOT NULL,
                token_symbol TEXT NOT NULL,
                last_updated INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await
        .context("Failed to create boosted_tokens table")?;

        Ok(())
    }
}

#[async_trait]
impl BoostStore for SqliteBoostStore {
    async fn get(&self, token_address: &str) -> Result<Option<StoredBoost>> {
        let row: Option<StoredBoostRow> = sqlx::query_as(
            "SELECT token_address, amount_total FROM boosted_tokens WHERE token_address = ?",
        )
        .bind(token_address)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to read boost state")?;

        Ok(row.map(|row| StoredBoost {
            token_address: row.token_address,
            amount_total: row.amount_total,
        }))
    }

    async fn upsert(&self, profile: &BoostedTokenProfile) -> Result<()> {
        debug!("Upserting boost state for {}", profile.token_address);

        let links_json = serde_json::to_string(&profile.links)?;

        sqlx::query(
            r#"
            INSERT INTO boosted_tokens (
                token_address, chain_id, url, icon, header, description, links,
                amount, amount_total, pairs_available, dex_pair,
                current_price, liquidity, market_cap, pair_created_at,
                token_name, token_symbol, last_updated
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(token_address) DO UPDATE SET
                chain_id = excluded.chain_id,
                url = excluded.url,
                icon = excluded.icon,
                header = excluded.header,
                description = excluded.description,
                links = excluded.links,
                amount = excluded.amount,
                amount_total = excluded.amount_total,
                pairs_available = excluded.pairs_available,
                dex_pair = excluded.dex_pair,
                current_price = excluded.current_price,
                liquidity = excluded.liquidity,
                market_cap = excluded.market_cap,
                pair_created_at = excluded.pair_created_at,
                token_name = excluded.token_name,
                token_symbol = excluded.token_symbol,
                last_updated = excluded.last_updated
            "#,
        )
        .bind(&profile.token_address)
        .bind(&profile.chain_id)
        .bind(&profile.url)
        .bind(&profile.icon)
        .bind(&profile.header)
        .bind(&profile.description)
        .bind(links_json)
        .bind(profile.amount)
        .bind(profile.amount_total)
        .bind(profile.pairs_available as i64)
        .bind(&profile.dex_pair)
        .bind(profile.current_price)
        .bind(profile.liquidity)
        .bind(profile.market_cap)
        .bind(profile.pair_created_at)
        .bind(&profile.token_name)
        .bind(&profile.token_symbol)
        .bind(chrono::Utc::now().timestamp_millis())
        .execute(&self.pool)
        .await
        .context("Failed to upsert boost state")?;

        Ok(())
    }

    async fn record_count(&self) -> Result<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM boosted_tokens")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count boost records")?;
        Ok(count)
    }
}
