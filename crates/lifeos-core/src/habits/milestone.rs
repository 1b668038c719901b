//! Display helpers for streak badges.

use serde::{Deserialize, Serialize};

/// Streak lengths that earn a badge.
pub const MILESTONES: [u32; 8] = [7, 14, 30, 60, 90, 100, 180, 365];

/// Nearest reached milestone and the one to aim for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakMilestone {
    pub milestone: Option<u32>,
    pub next_milestone: u32,
}

/// Colour intensity bucket for a streak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakIntensity {
    None,
    /// 1-7 days
    Starting,
    /// 8-30 days
    Building,
    /// More than 30 days
    Strong,
}

impl StreakIntensity {
    pub fn from_streak(streak: u32) -> Self {
        match streak {
            0 => StreakIntensity::None,
            1..=7 => StreakIntensity::Starting,
            8..=30 => StreakIntensity::Building,
            _ => StreakIntensity::Strong,
        }
    }

    /// Numeric level 0..=3.
    pub fn level(&self) -> u8 {
        match self {
            StreakIntensity::None => 0,
            StreakIntensity::Starting => 1,
            StreakIntensity::Building => 2,
            StreakIntensity::Strong => 3,
        }
    }
}

/// "No streak", "1 day", "N days".
pub fn format_streak(streak: u32) -> String {
    match streak {
        0 => "No streak".to_string(),
        1 => "1 day".to_string(),
        n => format!("{n} days"),
    }
}

pub fn streak_milestone(streak: u32) -> StreakMilestone {
    let reached = MILESTONES.iter().rev().find(|&&m| streak >= m).copied();
    let next_milestone = MILESTONES
        .iter()
        .find(|&&m| streak < m)
        .copied()
        .unwrap_or(MILESTONES[MILESTONES.len() - 1] * 2);

    StreakMilestone {
        milestone: reached,
        next_milestone,
    }
}
