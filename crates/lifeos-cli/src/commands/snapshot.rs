use std::path::{Path, PathBuf};

use clap::Subcommand;
use lifeos_core::{Clock, Config, Snapshot};

use super::with_clock;

#[derive(Subcommand)]
pub enum SnapshotAction {
    /// Tier every contact and compute every habit streak in an export
    Report {
        /// Path to the snapshot JSON
        file: PathBuf,
        /// Evaluation instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

fn report<C: Clock>(clock: &C, file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let report = Snapshot::load(file)?.report(clock, &config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn run(action: SnapshotAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SnapshotAction::Report { file, now } => {
            with_clock!(now.as_deref(), |clock| report(&clock, &file))
        }
    }
}
