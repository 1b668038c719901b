//! # lifeos Core Library
//!
//! Derived values behind the lifeos personal dashboard. Everything here is a
//! pure computation over rows the caller already fetched; the CLI and any
//! request handler are thin layers over the same functions.
//!
//! ## Architecture
//!
//! - **Player**: relationship tier scoring with weekly recency decay
//! - **Habits**: consecutive-day streaks, milestones and intensity buckets
//! - **Time**: natural-language due-date parsing and relative labels
//! - **Service**: fetch/compute/write-back orchestration over repository traits
//! - **Storage**: TOML configuration and JSON snapshots
//!
//! ## Key Components
//!
//! - [`TierCalculator`]: contact closeness score and tier
//! - [`calculate_streak`]: current/longest streak and at-risk flag
//! - [`parse_natural_date`]: due date from free text
//! - [`Clock`]: injectable evaluation instant
//! - [`Config`]: application configuration management

pub mod clock;
pub mod error;
pub mod habits;
pub mod player;
pub mod repository;
pub mod service;
pub mod storage;
pub mod thoughts;
pub mod time;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{ConfigError, CoreError, StorageError, ValidationError};
pub use habits::{calculate_streak, StreakData, StreakIntensity, StreakMilestone};
pub use player::{ContactStats, ContactTier, Interaction, TierCalculator, TierConfig, TierResult};
pub use repository::{CompletionRepository, InteractionRepository, MemoryStore};
pub use storage::{Config, DashboardReport, Snapshot};
pub use thoughts::NewThought;
pub use time::{extract_all_dates, format_relative_date, parse_natural_date, ParsedDate};
