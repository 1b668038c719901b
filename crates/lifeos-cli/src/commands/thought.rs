use clap::Subcommand;
use lifeos_core::service::capture_thought;
use lifeos_core::Clock;

use super::with_clock;

#[derive(Subcommand)]
pub enum ThoughtAction {
    /// Capture a thought and detect its due date
    Capture {
        text: String,
        /// Project the thought belongs to
        #[arg(long)]
        project: Option<String>,
        /// Reference instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

fn capture<C: Clock>(
    clock: &C,
    text: &str,
    project: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let thought = capture_thought(clock, text, project)?;
    println!("{}", serde_json::to_string_pretty(&thought)?);
    Ok(())
}

pub fn run(action: ThoughtAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ThoughtAction::Capture { text, project, now } => {
            with_clock!(now.as_deref(), |clock| capture(&clock, &text, project))
        }
    }
}
