//! Daily habits: streaks and badge helpers.

mod milestone;
mod streak;

pub use milestone::{format_streak, streak_milestone, StreakIntensity, StreakMilestone, MILESTONES};
pub use streak::{
    calculate_streak, calculate_streak_from_strings, format_completion_date,
    parse_completion_date, parse_completion_dates, StreakData,
};
