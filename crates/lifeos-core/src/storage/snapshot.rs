//! JSON snapshots of dashboard rows.
//!
//! A snapshot is an export of contacts, interactions, habits and habit
//! completions. Loading one fills a [`MemoryStore`]; reporting on it runs
//! every contact and habit through the same services a live request would.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::error::{Result, StorageError};
use crate::habits::{
    format_streak, parse_completion_date, streak_milestone, StreakData, StreakIntensity,
    StreakMilestone,
};
use crate::player::{ContactStats, Interaction, TierCalculator};
use crate::repository::MemoryStore;
use crate::service::{habit_streak, refresh_contact_stats};

use super::Config;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotContact {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotInteraction {
    pub contact_id: String,
    pub occurred_at: DateTime<Utc>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotHabit {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotCompletion {
    pub habit_id: String,
    /// `YYYY-MM-DD`
    pub completed_date: String,
}

/// Exported dashboard rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub contacts: Vec<SnapshotContact>,
    #[serde(default)]
    pub interactions: Vec<SnapshotInteraction>,
    #[serde(default)]
    pub habits: Vec<SnapshotHabit>,
    #[serde(default)]
    pub completions: Vec<SnapshotCompletion>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReport {
    pub id: String,
    pub name: String,
    pub tier_label: &'static str,
    #[serde(flatten)]
    pub stats: ContactStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct HabitReport {
    pub id: String,
    pub name: String,
    pub display: String,
    pub intensity: StreakIntensity,
    pub milestone: StreakMilestone,
    #[serde(flatten)]
    pub streak: StreakData,
}

/// Derived values for every contact and habit in a snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    pub contacts: Vec<ContactReport>,
    pub habits: Vec<HabitReport>,
}

impl Snapshot {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Fill a store with the snapshot rows.
    ///
    /// # Errors
    /// Rows pointing at unknown contacts or habits are rejected, as are
    /// completion dates that are not `YYYY-MM-DD`.
    pub fn into_store(self) -> Result<MemoryStore> {
        let mut store = MemoryStore::new();

        for contact in self.contacts {
            store.add_contact(contact.id, contact.name);
        }
        for habit in self.habits {
            store.add_habit(habit.id, habit.name);
        }

        for row in self.interactions {
            let interaction = Interaction::new(row.occurred_at, row.duration_minutes);
            store
                .log_interaction(&row.contact_id, interaction)
                .map_err(|_| {
                    StorageError::Snapshot(format!(
                        "interaction references unknown contact '{}'",
                        row.contact_id
                    ))
                })?;
        }
        for row in self.completions {
            let date = parse_completion_date(&row.completed_date)?;
            store.record_completion(&row.habit_id, date).map_err(|_| {
                StorageError::Snapshot(format!(
                    "completion references unknown habit '{}'",
                    row.habit_id
                ))
            })?;
        }

        Ok(store)
    }

    /// Refresh every contact's stats and compute every habit's streak.
    pub fn report<C: Clock>(self, clock: &C, config: &Config) -> Result<DashboardReport> {
        let mut store = self.into_store()?;
        let calculator = TierCalculator::with_config(config.tier.clone());

        let contact_ids: Vec<String> = store.contacts().map(|c| c.id.clone()).collect();
        let mut contacts = Vec::with_capacity(contact_ids.len());
        for id in contact_ids {
            let stats = refresh_contact_stats(&mut store, clock, &calculator, &id)?;
            let name = store
                .contact(&id)
                .map(|c| c.name.clone())
                .unwrap_or_default();
            contacts.push(ContactReport {
                id,
                name,
                tier_label: stats.tier.display_name(),
                stats,
            });
        }
        // Closest relationships first.
        contacts.sort_by(|a, b| b.stats.tier_score.cmp(&a.stats.tier_score));

        let mut habits = Vec::new();
        for habit in store.habits() {
            let streak = habit_streak(&store, clock, config.habits.history_days, &habit.id)?;
            habits.push(HabitReport {
                id: habit.id.clone(),
                name: habit.name.clone(),
                display: format_streak(streak.current_streak),
                intensity: StreakIntensity::from_streak(streak.current_streak),
                milestone: streak_milestone(streak.current_streak),
                streak,
            });
        }

        Ok(DashboardReport { contacts, habits })
    }
}
