use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lifeos", version, about = "lifeos CLI")]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Relationship tier scoring
    Tier {
        #[command(subcommand)]
        action: commands::tier::TierAction,
    },
    /// Habit streaks
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Natural-language dates
    Date {
        #[command(subcommand)]
        action: commands::date::DateAction,
    },
    /// Thought capture
    Thought {
        #[command(subcommand)]
        action: commands::thought::ThoughtAction,
    },
    /// Reports over exported dashboard data
    Snapshot {
        #[command(subcommand)]
        action: commands::snapshot::SnapshotAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("LIFEOS_LOG")
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Tier { action } => commands::tier::run(action),
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Date { action } => commands::date::run(action),
        Commands::Thought { action } => commands::thought::run(action),
        Commands::Snapshot { action } => commands::snapshot::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
