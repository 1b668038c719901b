//! Request-level operations: fetch rows, compute, write back.

use chrono::{Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clock::Clock;
use crate::error::Result;
use crate::habits::{calculate_streak, StreakData};
use crate::player::{ContactStats, TierCalculator};
use crate::repository::{CompletionRepository, InteractionRepository};
use crate::thoughts::NewThought;

/// Result of toggling a habit for one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleOutcome {
    pub completed: bool,
    pub streak: StreakData,
}

/// Recompute and store the cached tier and totals for a contact.
///
/// Call after any change to the contact's interactions.
pub fn refresh_contact_stats<R, C>(
    repo: &mut R,
    clock: &C,
    calculator: &TierCalculator,
    contact_id: &str,
) -> Result<ContactStats>
where
    R: InteractionRepository + ?Sized,
    C: Clock,
{
    let interactions = repo.interactions_for_contact(contact_id)?;
    let stats = ContactStats::compute(&interactions, clock.now().with_timezone(&Utc), calculator);
    repo.save_contact_stats(contact_id, &stats)?;

    info!(
        contact_id,
        tier = stats.tier.as_str(),
        score = stats.tier_score,
        "refreshed contact stats"
    );
    Ok(stats)
}

/// First day of the completion window ending today.
fn history_start(today: NaiveDate, history_days: u32) -> NaiveDate {
    today
        .checked_sub_days(Days::new(u64::from(history_days)))
        .unwrap_or(NaiveDate::MIN)
}

/// Streak for a habit over the last `history_days` days.
pub fn habit_streak<R, C>(repo: &R, clock: &C, history_days: u32, habit_id: &str) -> Result<StreakData>
where
    R: CompletionRepository + ?Sized,
    C: Clock,
{
    let today = clock.today();
    let dates = repo.completion_dates(habit_id, history_start(today, history_days))?;
    Ok(calculate_streak(&dates, today))
}

/// Mark or unmark a habit for `date` (today when `None`) and return the new streak.
pub fn toggle_habit_completion<R, C>(
    repo: &mut R,
    clock: &C,
    history_days: u32,
    habit_id: &str,
    date: Option<NaiveDate>,
) -> Result<ToggleOutcome>
where
    R: CompletionRepository + ?Sized,
    C: Clock,
{
    let date = date.unwrap_or_else(|| clock.today());
    let completed = repo.toggle_completion(habit_id, date)?;
    info!(habit_id, %date, completed, "toggled habit completion");

    let streak = habit_streak(repo, clock, history_days, habit_id)?;
    Ok(ToggleOutcome { completed, streak })
}

/// Build a thought from user input, stamping its due date from the clock.
pub fn capture_thought<C: Clock>(
    clock: &C,
    content: &str,
    project_id: Option<String>,
) -> Result<NewThought> {
    Ok(NewThought::capture(content, project_id, &clock.now())?)
}
