//! Cached per-contact statistics.
//!
//! These values are derived from the full interaction list and are
//! recomputed whenever that list changes. They are never a source of truth.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tier::{ContactTier, Interaction, TierCalculator};

/// Derived fields stored back onto a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactStats {
    pub tier: ContactTier,
    pub tier_score: u8,
    pub interaction_count: usize,
    /// Sum of logged durations; interactions without one count as zero here.
    pub total_interaction_minutes: u64,
    pub last_interaction_at: Option<DateTime<Utc>>,
}

impl ContactStats {
    pub fn compute(
        interactions: &[Interaction],
        now: DateTime<Utc>,
        calculator: &TierCalculator,
    ) -> Self {
        let result = calculator.compute(interactions, now);

        Self {
            tier: result.tier,
            tier_score: result.score,
            interaction_count: interactions.len(),
            total_interaction_minutes: interactions
                .iter()
                .map(|i| u64::from(i.duration_minutes.unwrap_or(0)))
                .sum(),
            last_interaction_at: interactions.iter().map(|i| i.occurred_at).max(),
        }
    }
}

impl Default for ContactStats {
    fn default() -> Self {
        Self {
            tier: ContactTier::Dormant,
            tier_score: 0,
            interaction_count: 0,
            total_interaction_minutes: 0,
            last_interaction_at: None,
        }
    }
}
