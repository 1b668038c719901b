pub mod config;
pub mod date;
pub mod snapshot;
pub mod streak;
pub mod thought;
pub mod tier;

use chrono::{DateTime, FixedOffset};
use lifeos_core::FixedClock;

/// Clock pinned to an explicit `--now` (RFC 3339). `None` means the system clock.
pub fn pinned_clock(
    now: Option<&str>,
) -> Result<Option<FixedClock<FixedOffset>>, Box<dyn std::error::Error>> {
    let Some(raw) = now else {
        return Ok(None);
    };
    let now = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| format!("invalid --now '{raw}': {e}"))?;
    tracing::debug!(%now, "evaluation instant pinned");
    Ok(Some(FixedClock::new(now)))
}

/// Runs `$body` with `$clock` bound to the `--now` override, or to the
/// system clock in the local time zone.
macro_rules! with_clock {
    ($now:expr, |$clock:ident| $body:expr) => {
        match $crate::commands::pinned_clock($now)? {
            Some($clock) => $body,
            None => {
                let $clock = lifeos_core::SystemClock;
                $body
            }
        }
    };
}

pub(crate) use with_clock;
