mod config;
pub mod snapshot;

pub use config::{Config, HabitsConfig};
pub use snapshot::{ContactReport, DashboardReport, HabitReport, Snapshot};

use std::path::PathBuf;

use crate::error::Result;

/// Returns `~/.config/lifeos[-dev]/` based on LIFEOS_ENV.
///
/// Set LIFEOS_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LIFEOS_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lifeos-dev")
    } else {
        base_dir.join("lifeos")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
