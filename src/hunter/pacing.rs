//! Request pacing for the pair-detail endpoint.
//!
//! The boosts list arrives in one request per cycle, but every new or
//! changed token costs a detail lookup. This wrapper keeps those lookups
//! inside the upstream's per-minute budget.

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;

pub struct DetailPacer {
    limiter: DefaultDirectRateLimiter,
}

impl DetailPacer {
    pub fn new(requests_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::new(60).unwrap()),
        );
        Self {
            limiter: RateLimiter::direct(quota),
        }
    }

    /// Wait until the next detail request is within budget.
    pub async fn until_ready(&self) {
        self.limiter.until_ready().await;
    }
}
