use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use lifeos_core::{Clock, Config, ContactStats, Interaction, TierCalculator};
use serde::Serialize;

use super::with_clock;

#[derive(Subcommand)]
pub enum TierAction {
    /// Score an interaction history (JSON array of {occurred_at, duration_minutes})
    Score {
        /// Path to the JSON file
        file: PathBuf,
        /// Evaluation instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
    /// Tier for a score under the configured thresholds
    Lookup {
        /// Score from 0 to 100
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        score: u8,
    },
}

fn score_file<C: Clock>(
    clock: &C,
    file: &Path,
    calculator: &TierCalculator,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(file)?;
    let interactions: Vec<Interaction> = serde_json::from_str(&content)?;
    let now = clock.now().with_timezone(&Utc);
    let stats = ContactStats::compute(&interactions, now, calculator);
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

#[derive(Serialize)]
struct TierLookup {
    score: u8,
    tier: lifeos_core::ContactTier,
    label: &'static str,
}

pub fn run(action: TierAction) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let calculator = TierCalculator::with_config(config.tier);

    match action {
        TierAction::Score { file, now } => {
            with_clock!(now.as_deref(), |clock| score_file(&clock, &file, &calculator))?;
        }
        TierAction::Lookup { score } => {
            let tier = calculator.tier_for(score);
            let lookup = TierLookup {
                score,
                tier,
                label: tier.display_name(),
            };
            println!("{}", serde_json::to_string_pretty(&lookup)?);
        }
    }
    Ok(())
}
