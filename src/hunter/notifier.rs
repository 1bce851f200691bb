//! Alert output.
//!
//! The console notifier renders an enriched profile (plus optional rugcheck
//! findings) as a human-readable block. Nothing in the pipeline consumes
//! its output.

use crate::types::{BoostedTokenProfile, RiskFinding, RiskLevel};
use async_trait::async_trait;
use colored::Colorize;

/// Boost totals above this get the golden-ticker treatment.
const GOLDEN_TICKER_THRESHOLD: f64 = 499.0;

/// Renders enriched records for a human.
#[async_trait]
pub trait BoostNotifier: Send + Sync {
    /// Display one alert. `risks` is `None` when no rugcheck report was
    /// available (disabled or unreachable); an empty slice is an explicit
    /// all-clear.
    async fn display(&self, profile: &BoostedTokenProfile, risks: Option<&[RiskFinding]>);
}

/// Colored console renderer.
pub struct ConsoleNotifier;

#[async_trait]
impl BoostNotifier for ConsoleNotifier {
    async fn display(&self, profile: &BoostedTokenProfile, risks: Option<&[RiskFinding]>) {
        let boost_line = format!("⚡ Boost Amount: {}", profile.amount_total);
        let boost_line = if profile.amount_total > GOLDEN_TICKER_THRESHOLD {
            format!("🔥 Boost Amount: {}", profile.amount_total)
                .on_bright_yellow()
                .black()
        } else {
            boost_line.on_bright_black()
        };

        let socials = profile.links.as_ref().map_or(0, |links| links.len());
        let socials_line = if socials > 0 {
            format!("🟢 This token has {} socials.", socials).bright_green()
        } else {
            "🔴 This token has 0 socials.".on_bright_black()
        };

        let age = if profile.pair_created_at > 0 {
            relative_age(
                profile.pair_created_at,
                chrono::Utc::now().timestamp_millis(),
            )
        } else {
            "N/A".to_string()
        };

        let (pump_icon, pump_label) = if profile.is_pump_fun() {
            ("🟢", "Yes")
        } else {
            ("🔴", "No")
        };

        println!("\n\n[ Boost Information ]");
        println!(
            "✅ {} boosts added for {} ({}).",
            profile.amount, profile.token_name, profile.token_symbol
        );
        println!("{}", boost_line);
        println!("[ Token Information ]");
        println!("{}", socials_line);
        println!(
            "🕝 This token pair was created {} and has {} pairs available including {}",
            age, profile.pairs_available, profile.dex_pair
        );
        println!("🤑 Current Price: ${}", profile.current_price);
        println!("📦 Current Mkt Cap: ${}", profile.market_cap);
        println!("💦 Current Liquidity: ${}", profile.liquidity);
        println!("🚀 Pumpfun token: {} {}", pump_icon, pump_label);
        if let Some(findings) = risks {
            println!("[ Rugcheck Result   ]");
            if findings.is_empty() {
                println!("{}", "🟢 No risks found".bright_green());
            }
            for finding in findings {
                println!(
                    "{} {}: {}",
                    level_icon(finding.level),
                    finding.name,
                    finding.description
                );
            }
        }
        println!("[ Checkout Token    ]");
        println!(
            "👀 View on Dex https://dexscreener.com/{}/{}",
            profile.chain_id, profile.token_address
        );
        println!(
            "👽 Buy via GMGN https://gmgn.ai/sol/token/{}",
            profile.token_address
        );
    }
}

fn level_icon(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Danger => "🔴",
        RiskLevel::Warn => "🟡",
        RiskLevel::Other => "⚪",
    }
}

/// Coarse human-readable age of a pair, e.g. "3 days ago".
fn relative_age(created_ms: i64, now_ms: i64) -> String {
    let elapsed_secs = (now_ms - created_ms) / 1000;
    if elapsed_secs < 60 {
        return "just now".to_string();
    }

    let (value, unit) = if elapsed_secs < 3600 {
        (elapsed_secs / 60, "minute")
    } else if elapsed_secs < 86_400 {
        (elapsed_secs / 3600, "hour")
    } else {
        (elapsed_secs / 86_400, "day")
    };

    let plural = if value == 1 { "" } else { "s" };
    format!("{} {}{} ago", value, unit, plural)
}
