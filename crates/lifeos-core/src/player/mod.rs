//! Player Menu: relationship tiers for tracked contacts.

mod stats;
mod tier;

pub use stats::ContactStats;
pub use tier::{
    compute_tier, compute_tier_score, score_to_tier, ContactTier, Interaction, TierCalculator, TierConfig,
    TierResult, TierThresholds, MAX_SCORE,
};
