use chrono::DateTime;
use clap::Subcommand;
use lifeos_core::time::{is_overdue, is_today};
use lifeos_core::{extract_all_dates, format_relative_date, parse_natural_date, Clock};
use serde::Serialize;

use super::with_clock;

#[derive(Subcommand)]
pub enum DateAction {
    /// Find the due date in a piece of text
    Parse {
        text: String,
        /// Reference instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// List every date expression in a piece of text
    Extract {
        text: String,
        #[arg(long)]
        now: Option<String>,
    },
    /// Describe a date relative to now
    Relative {
        /// Date (RFC 3339)
        date: String,
        #[arg(long)]
        now: Option<String>,
    },
}

#[derive(Serialize)]
struct RelativeDate {
    label: String,
    overdue: bool,
    today: bool,
}

fn parse<C: Clock>(clock: &C, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = parse_natural_date(text, &clock.now());
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

fn extract<C: Clock>(clock: &C, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    let dates = extract_all_dates(text, &clock.now());
    println!("{}", serde_json::to_string_pretty(&dates)?);
    Ok(())
}

fn relative<C: Clock>(clock: &C, date: &str) -> Result<(), Box<dyn std::error::Error>> {
    let now = clock.now();
    let date =
        DateTime::parse_from_rfc3339(date).map_err(|e| format!("invalid date '{date}': {e}"))?;
    let relative = RelativeDate {
        label: format_relative_date(&date, &now),
        overdue: is_overdue(&date, &now),
        today: is_today(&date, &now),
    };
    println!("{}", serde_json::to_string_pretty(&relative)?);
    Ok(())
}

pub fn run(action: DateAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DateAction::Parse { text, now } => with_clock!(now.as_deref(), |clock| parse(&clock, &text)),
        DateAction::Extract { text, now } => {
            with_clock!(now.as_deref(), |clock| extract(&clock, &text))
        }
        DateAction::Relative { date, now } => {
            with_clock!(now.as_deref(), |clock| relative(&clock, &date))
        }
    }
}
