//! Row-fetch and write-back seams used by the service layer.
//!
//! The dashboard's real persistence lives elsewhere; anything that can hand
//! out interaction and completion rows and store derived stats can drive the
//! services. [`MemoryStore`] is the in-process implementation used for
//! snapshot reports and tests.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StorageError};
use crate::player::{ContactStats, Interaction};

/// Interaction history per contact, plus a place to cache derived stats.
pub trait InteractionRepository {
    /// All interactions logged for `contact_id`.
    fn interactions_for_contact(&self, contact_id: &str) -> Result<Vec<Interaction>>;

    /// Store recomputed stats on the contact.
    fn save_contact_stats(&mut self, contact_id: &str, stats: &ContactStats) -> Result<()>;
}

/// Habit completion rows.
pub trait CompletionRepository {
    /// Completion days for `habit_id` on or after `since`, most recent first.
    fn completion_dates(&self, habit_id: &str, since: NaiveDate) -> Result<Vec<NaiveDate>>;

    /// Flip completion for `date`. Returns `true` when the habit is now completed.
    fn toggle_completion(&mut self, habit_id: &str, date: NaiveDate) -> Result<bool>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub stats: ContactStats,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitRecord {
    pub id: String,
    pub name: String,
}

/// In-memory store keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    contacts: BTreeMap<String, ContactRecord>,
    interactions: BTreeMap<String, Vec<Interaction>>,
    habits: BTreeMap<String, HabitRecord>,
    completions: BTreeMap<String, BTreeSet<NaiveDate>>,
}

fn not_found(kind: &'static str, id: &str) -> StorageError {
    StorageError::NotFound {
        kind,
        id: id.to_string(),
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_contact(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        self.interactions.entry(id.clone()).or_default();
        self.contacts.insert(
            id.clone(),
            ContactRecord {
                id,
                name: name.into(),
                stats: ContactStats::default(),
            },
        );
    }

    /// Append an interaction to an existing contact.
    ///
    /// # Errors
    /// Returns [`StorageError::NotFound`] for an unknown contact.
    pub fn log_interaction(&mut self, contact_id: &str, interaction: Interaction) -> Result<()> {
        self.interactions
            .get_mut(contact_id)
            .ok_or_else(|| not_found("contact", contact_id))?
            .push(interaction);
        Ok(())
    }

    pub fn add_habit(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let id = id.into();
        self.completions.entry(id.clone()).or_default();
        self.habits.insert(
            id.clone(),
            HabitRecord {
                id,
                name: name.into(),
            },
        );
    }

    /// Mark `habit_id` done on `date`. Recording the same day twice is a no-op.
    pub fn record_completion(&mut self, habit_id: &str, date: NaiveDate) -> Result<()> {
        self.completions
            .get_mut(habit_id)
            .ok_or_else(|| not_found("habit", habit_id))?
            .insert(date);
        Ok(())
    }

    pub fn contact(&self, id: &str) -> Option<&ContactRecord> {
        self.contacts.get(id)
    }

    pub fn contacts(&self) -> impl Iterator<Item = &ContactRecord> {
        self.contacts.values()
    }

    pub fn habits(&self) -> impl Iterator<Item = &HabitRecord> {
        self.habits.values()
    }
}

impl InteractionRepository for MemoryStore {
    fn interactions_for_contact(&self, contact_id: &str) -> Result<Vec<Interaction>> {
        self.interactions
            .get(contact_id)
            .cloned()
            .ok_or_else(|| not_found("contact", contact_id).into())
    }

    fn save_contact_stats(&mut self, contact_id: &str, stats: &ContactStats) -> Result<()> {
        let contact = self
            .contacts
            .get_mut(contact_id)
            .ok_or_else(|| not_found("contact", contact_id))?;
        contact.stats = stats.clone();
        Ok(())
    }
}

impl CompletionRepository for MemoryStore {
    fn completion_dates(&self, habit_id: &str, since: NaiveDate) -> Result<Vec<NaiveDate>> {
        let dates = self
            .completions
            .get(habit_id)
            .ok_or_else(|| not_found("habit", habit_id))?;
        Ok(dates.range(since..).rev().copied().collect())
    }

    fn toggle_completion(&mut self, habit_id: &str, date: NaiveDate) -> Result<bool> {
        let dates = self
            .completions
            .get_mut(habit_id)
            .ok_or_else(|| not_found("habit", habit_id))?;
        if dates.remove(&date) {
            Ok(false)
        } else {
            dates.insert(date);
            Ok(true)
        }
    }
}
