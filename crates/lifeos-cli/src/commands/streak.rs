use chrono::Local;
use clap::Subcommand;
use lifeos_core::habits::{
    calculate_streak_from_strings, format_streak, parse_completion_date, streak_milestone,
};
use lifeos_core::{StreakData, StreakIntensity, StreakMilestone};
use serde::Serialize;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Compute a streak from completion dates
    Calc {
        /// Completion dates (YYYY-MM-DD)
        dates: Vec<String>,
        /// Reference day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
}

#[derive(Serialize)]
struct StreakReport {
    #[serde(flatten)]
    streak: StreakData,
    display: String,
    intensity: StreakIntensity,
    milestone: StreakMilestone,
}

pub fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        StreakAction::Calc { dates, today } => {
            let today = match today {
                Some(raw) => parse_completion_date(&raw)?,
                None => Local::now().date_naive(),
            };
            let streak = calculate_streak_from_strings(&dates, today)?;
            let report = StreakReport {
                display: format_streak(streak.current_streak),
                intensity: StreakIntensity::from_streak(streak.current_streak),
                milestone: streak_milestone(streak.current_streak),
                streak,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}
