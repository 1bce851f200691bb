//! New-information check for boost observations.
//!
//! The boosts feed re-sends the full current list every cycle. Without this
//! check every token would be re-enriched and re-alerted on every poll,
//! flooding the output and burning the detail endpoint's request budget.

use crate::types::StoredBoost;

/// Outcome of comparing a fresh observation against the stored state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoostDecision {
    /// First sighting or changed total: enrich, persist, maybe alert
    Process,
    /// Same total as last time: nothing new
    Skip,
}

/// Decide whether an observed boost total is new information.
///
/// Process iff there is no stored record or the stored total differs from
/// the observed one. The comparison is exact and symmetric: a total that
/// went *down* (which a well-behaved upstream never produces) still counts
/// as a change and is reprocessed.
pub fn assess(observed_total: f64, stored: Option<&StoredBoost>) -> BoostDecision {
    match stored {
        None => BoostDecision::Process,
        Some(record) if record.amount_total != observed_total => BoostDecision::Process,
        Some(_) => BoostDecision::Skip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored(total: f64) -> StoredBoost {
        StoredBoost {
            token_address: "abc".to_string(),
            amount_total: total,
        }
    }

    #[test]
    fn unseen_token_is_processed() {
        assert_eq!(assess(500.0, None), BoostDecision::Process);
        assert_eq!(assess(0.0, None), BoostDecision::Process);
    }

    #[test]
    fn equal_total_is_skipped() {
        assert_eq!(assess(500.0, Some(&stored(500.0))), BoostDecision::Skip);
    }

    #[test]
    fn increased_total_is_processed() {
        assert_eq!(assess(510.0, Some(&stored(500.0))), BoostDecision::Process);
    }

    #[test]
    fn decreased_total_is_still_processed() {
        assert_eq!(assess(490.0, Some(&stored(500.0))), BoostDecision::Process);
    }

    #[test]
    fn comparison_has_no_tolerance() {
        assert_eq!(assess(500.0001, Some(&stored(500.0))), BoostDecision::Process);
    }
}
