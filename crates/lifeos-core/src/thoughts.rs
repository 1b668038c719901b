//! Captured thoughts and their detected due dates.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::time::parse_natural_date;

/// A thought ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewThought {
    pub content: String,
    pub project_id: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    /// The expression the due date was read from, e.g. "next Friday".
    pub due_date_text: Option<String>,
}

impl NewThought {
    /// Build a thought from raw input, detecting a due date in its content.
    ///
    /// # Errors
    /// Returns [`ValidationError::EmptyContent`] when the content is blank.
    pub fn capture<Tz: TimeZone>(
        content: &str,
        project_id: Option<String>,
        now: &DateTime<Tz>,
    ) -> Result<Self, ValidationError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::EmptyContent);
        }

        let parsed = parse_natural_date(content, now);

        Ok(Self {
            content: content.to_string(),
            project_id,
            due_date: parsed.as_ref().map(|p| p.date.with_timezone(&Utc)),
            due_date_text: parsed.map(|p| p.original_text),
        })
    }
}
