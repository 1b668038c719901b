//! Habit streak calculation.
//!
//! A streak counts consecutive calendar days with a completion. It stays
//! alive while the most recent completion is today or yesterday; a gap of two
//! or more days resets it to zero.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Streak summary for one habit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StreakData {
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_completed_date: Option<NaiveDate>,
    pub is_completed_today: bool,
    /// Active streak that breaks unless the habit is completed before the day ends.
    pub is_streak_at_risk: bool,
}

/// Compute the streak summary for `completion_dates` as of `today`.
///
/// Order and duplicates in the input do not matter.
pub fn calculate_streak(completion_dates: &[NaiveDate], today: NaiveDate) -> StreakData {
    let unique: BTreeSet<NaiveDate> = completion_dates.iter().copied().collect();
    let sorted: Vec<NaiveDate> = unique.into_iter().rev().collect();

    let Some(&most_recent) = sorted.first() else {
        return StreakData::default();
    };

    let yesterday = today.pred_opt();
    let is_completed_today = most_recent == today;
    let completed_yesterday = Some(most_recent) == yesterday;

    let mut current_streak = 0;
    if is_completed_today || completed_yesterday {
        let mut expected = Some(most_recent);
        for &date in &sorted {
            match expected {
                Some(day) if date == day => {
                    current_streak += 1;
                    expected = day.pred_opt();
                }
                Some(day) if date < day => break,
                None => break,
                _ => {}
            }
        }
    }

    StreakData {
        current_streak,
        longest_streak: longest_run(&sorted),
        last_completed_date: Some(most_recent),
        is_completed_today,
        is_streak_at_risk: !is_completed_today && completed_yesterday && current_streak > 0,
    }
}

/// Longest run of consecutive days in a descending, duplicate-free list.
fn longest_run(sorted_desc: &[NaiveDate]) -> u32 {
    if sorted_desc.is_empty() {
        return 0;
    }

    let mut longest = 0;
    let mut run = 1;
    for pair in sorted_desc.windows(2) {
        if pair[0].signed_duration_since(pair[1]).num_days() == 1 {
            run += 1;
        } else {
            longest = longest.max(run);
            run = 1;
        }
    }
    longest.max(run)
}

/// Parse a stored `YYYY-MM-DD` completion date.
///
/// # Errors
/// Returns [`ValidationError::InvalidDate`] for anything else.
pub fn parse_completion_date(value: &str) -> Result<NaiveDate, ValidationError> {
    let invalid = || ValidationError::InvalidDate {
        value: value.to_string(),
    };
    if value.len() != 10 {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid())
}

/// Parse every date, failing on the first malformed one.
pub fn parse_completion_dates<S: AsRef<str>>(
    values: &[S],
) -> Result<Vec<NaiveDate>, ValidationError> {
    values
        .iter()
        .map(|v| parse_completion_date(v.as_ref()))
        .collect()
}

/// [`calculate_streak`] over raw `YYYY-MM-DD` strings.
pub fn calculate_streak_from_strings<S: AsRef<str>>(
    completion_dates: &[S],
    today: NaiveDate,
) -> Result<StreakData, ValidationError> {
    let dates = parse_completion_dates(completion_dates)?;
    Ok(calculate_streak(&dates, today))
}

/// Format a date the way completions are stored.
pub fn format_completion_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
