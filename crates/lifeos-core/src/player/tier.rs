//! Relationship tier scoring.
//!
//! Every logged interaction contributes a fixed weight, decayed weekly by
//! recency and boosted by how long the interaction lasted. The summed score
//! is rounded, clamped to 0..=100 and bucketed into a [`ContactTier`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const MS_PER_WEEK: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Upper bound of a tier score.
pub const MAX_SCORE: u8 = 100;

/// Relationship closeness bucket. Closer tiers compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactTier {
    InnerCircle,
    Close,
    Regular,
    Acquaintance,
    Dormant,
}

impl ContactTier {
    /// All tiers in descending order of closeness.
    pub const ALL: [ContactTier; 5] = [
        ContactTier::InnerCircle,
        ContactTier::Close,
        ContactTier::Regular,
        ContactTier::Acquaintance,
        ContactTier::Dormant,
    ];

    /// Closeness rank, 0 for dormant up to 4 for inner circle.
    pub fn rank(&self) -> u8 {
        match self {
            ContactTier::InnerCircle => 4,
            ContactTier::Close => 3,
            ContactTier::Regular => 2,
            ContactTier::Acquaintance => 1,
            ContactTier::Dormant => 0,
        }
    }

    /// Storage identifier (`inner_circle`, `close`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactTier::InnerCircle => "inner_circle",
            ContactTier::Close => "close",
            ContactTier::Regular => "regular",
            ContactTier::Acquaintance => "acquaintance",
            ContactTier::Dormant => "dormant",
        }
    }

    /// Human-readable label for badges and listings.
    pub fn display_name(&self) -> &'static str {
        match self {
            ContactTier::InnerCircle => "Inner Circle",
            ContactTier::Close => "Close",
            ContactTier::Regular => "Regular",
            ContactTier::Acquaintance => "Acquaintance",
            ContactTier::Dormant => "Dormant",
        }
    }
}

impl PartialOrd for ContactTier {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ContactTier {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl fmt::Display for ContactTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContactTier {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContactTier::ALL
            .into_iter()
            .find(|tier| tier.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidValue {
                field: "tier".into(),
                message: format!("unknown tier '{s}'"),
            })
    }
}

/// A logged interaction, reduced to the fields that affect scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interaction {
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl Interaction {
    pub fn new(occurred_at: DateTime<Utc>, duration_minutes: Option<u32>) -> Self {
        Self {
            occurred_at,
            duration_minutes,
        }
    }
}

/// Minimum score for each tier above dormant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    #[serde(default = "default_inner_circle")]
    pub inner_circle: u8,
    #[serde(default = "default_close")]
    pub close: u8,
    #[serde(default = "default_regular")]
    pub regular: u8,
    #[serde(default = "default_acquaintance")]
    pub acquaintance: u8,
}

impl TierThresholds {
    /// Minimum score that qualifies for `tier`. Dormant always qualifies.
    pub fn threshold_for(&self, tier: ContactTier) -> u8 {
        match tier {
            ContactTier::InnerCircle => self.inner_circle,
            ContactTier::Close => self.close,
            ContactTier::Regular => self.regular,
            ContactTier::Acquaintance => self.acquaintance,
            ContactTier::Dormant => 0,
        }
    }
}

/// Tuning knobs for the tier score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierConfig {
    /// Base points per interaction
    #[serde(default = "default_interaction_weight")]
    pub interaction_weight: f64,
    /// Weekly decay factor (0.95 = 5% decay per week)
    #[serde(default = "default_recency_decay")]
    pub recency_decay: f64,
    /// Bonus per hour of interaction
    #[serde(default = "default_duration_bonus_multiplier")]
    pub duration_bonus_multiplier: f64,
    /// Duration assumed when none was logged
    #[serde(default = "default_duration_minutes")]
    pub default_duration_minutes: u32,
    /// Durations beyond this earn no extra bonus
    #[serde(default = "default_max_duration_minutes")]
    pub max_duration_minutes: u32,
    #[serde(default)]
    pub thresholds: TierThresholds,
}

fn default_interaction_weight() -> f64 {
    10.0
}
fn default_recency_decay() -> f64 {
    0.95
}
fn default_duration_bonus_multiplier() -> f64 {
    0.5
}
fn default_duration_minutes() -> u32 {
    15
}
fn default_max_duration_minutes() -> u32 {
    120
}
fn default_inner_circle() -> u8 {
    80
}
fn default_close() -> u8 {
    60
}
fn default_regular() -> u8 {
    40
}
fn default_acquaintance() -> u8 {
    20
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            inner_circle: default_inner_circle(),
            close: default_close(),
            regular: default_regular(),
            acquaintance: default_acquaintance(),
        }
    }
}

impl Default for TierConfig {
    fn default() -> Self {
        Self {
            interaction_weight: default_interaction_weight(),
            recency_decay: default_recency_decay(),
            duration_bonus_multiplier: default_duration_bonus_multiplier(),
            default_duration_minutes: default_duration_minutes(),
            max_duration_minutes: default_max_duration_minutes(),
            thresholds: TierThresholds::default(),
        }
    }
}

impl TierConfig {
    /// Check that the configuration produces meaningful scores.
    ///
    /// # Errors
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.recency_decay > 0.0 && self.recency_decay <= 1.0) {
            return Err(invalid("tier.recency_decay", "must be in (0, 1]"));
        }
        if !(self.interaction_weight >= 0.0) {
            return Err(invalid("tier.interaction_weight", "must be non-negative"));
        }
        if !(self.duration_bonus_multiplier >= 0.0) {
            return Err(invalid(
                "tier.duration_bonus_multiplier",
                "must be non-negative",
            ));
        }

        let t = &self.thresholds;
        if t.inner_circle > MAX_SCORE {
            return Err(invalid("tier.thresholds.inner_circle", "must be at most 100"));
        }
        if !(t.inner_circle > t.close && t.close > t.regular && t.regular > t.acquaintance) {
            return Err(invalid(
                "tier.thresholds",
                "must be strictly descending from inner_circle to acquaintance",
            ));
        }
        if t.acquaintance == 0 {
            return Err(invalid("tier.thresholds.acquaintance", "must be above 0"));
        }
        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

/// Score and tier computed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierResult {
    pub score: u8,
    pub tier: ContactTier,
}

/// Tier calculator bound to a configuration.
#[derive(Debug, Clone, Default)]
pub struct TierCalculator {
    config: TierConfig,
}

impl TierCalculator {
    /// Create a new calculator with default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: TierConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TierConfig {
        &self.config
    }

    /// Unrounded points contributed by one interaction as of `now`.
    ///
    /// Future-dated interactions are treated as happening right now.
    pub fn contribution(&self, interaction: &Interaction, now: DateTime<Utc>) -> f64 {
        let elapsed_ms = (now - interaction.occurred_at).num_milliseconds() as f64;
        let weeks_ago = (elapsed_ms / MS_PER_WEEK).max(0.0);
        let decay_factor = self.config.recency_decay.powf(weeks_ago);

        let minutes = interaction
            .duration_minutes
            .unwrap_or(self.config.default_duration_minutes)
            .min(self.config.max_duration_minutes);
        let duration_bonus = 1.0 + (minutes as f64 / 60.0) * self.config.duration_bonus_multiplier;

        self.config.interaction_weight * decay_factor * duration_bonus
    }

    /// Sum of all contributions before rounding and clamping.
    pub fn raw_score(&self, interactions: &[Interaction], now: DateTime<Utc>) -> f64 {
        interactions
            .iter()
            .map(|interaction| self.contribution(interaction, now))
            .sum()
    }

    /// Tier score in 0..=100.
    pub fn score(&self, interactions: &[Interaction], now: DateTime<Utc>) -> u8 {
        if interactions.is_empty() {
            return 0;
        }
        let rounded = self.raw_score(interactions, now).round();
        if rounded.is_nan() {
            return 0;
        }
        rounded.clamp(0.0, MAX_SCORE as f64) as u8
    }

    /// Highest tier whose threshold `score` reaches.
    pub fn tier_for(&self, score: u8) -> ContactTier {
        score_to_tier(score, &self.config)
    }

    /// Score and tier in one call.
    pub fn compute(&self, interactions: &[Interaction], now: DateTime<Utc>) -> TierResult {
        let score = self.score(interactions, now);
        let tier = self.tier_for(score);
        tracing::debug!(
            interactions = interactions.len(),
            score,
            tier = tier.as_str(),
            "computed contact tier"
        );
        TierResult { score, tier }
    }
}

/// Descending-threshold lookup.
pub fn score_to_tier(score: u8, config: &TierConfig) -> ContactTier {
    let thresholds = &config.thresholds;
    if score >= thresholds.inner_circle {
        ContactTier::InnerCircle
    } else if score >= thresholds.close {
        ContactTier::Close
    } else if score >= thresholds.regular {
        ContactTier::Regular
    } else if score >= thresholds.acquaintance {
        ContactTier::Acquaintance
    } else {
        ContactTier::Dormant
    }
}

/// Tier score of `interactions` as of `now` under `config`.
pub fn compute_tier_score(
    interactions: &[Interaction],
    now: DateTime<Utc>,
    config: &TierConfig,
) -> u8 {
    TierCalculator::with_config(config.clone()).score(interactions, now)
}

/// Score and tier of `interactions` as of `now` under `config`.
pub fn compute_tier(
    interactions: &[Interaction],
    now: DateTime<Utc>,
    config: &TierConfig,
) -> TierResult {
    TierCalculator::with_config(config.clone()).compute(interactions, now)
}
