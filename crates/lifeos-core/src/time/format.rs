//! Relative-date labels and due-date predicates.

use chrono::{DateTime, Datelike, Days, TimeZone};

/// Short label for `date` as seen from `now`.
///
/// Calendar days are compared in `now`'s zone: "Today", "Tomorrow",
/// "Yesterday", a weekday name up to a week ahead, "Next week" up to two
/// weeks ahead, otherwise "Mar 5" (with the year when it differs from now's).
pub fn format_relative_date<Tz, Tz2>(date: &DateTime<Tz2>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz2: TimeZone,
{
    let target = date.with_timezone(&now.timezone()).date_naive();
    let today = now.date_naive();
    let diff_days = target.signed_duration_since(today).num_days();

    match diff_days {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        -1 => "Yesterday".to_string(),
        2..=7 => target.format("%A").to_string(),
        8..=14 => "Next week".to_string(),
        _ if target.year() != today.year() => target.format("%b %-d, %Y").to_string(),
        _ => target.format("%b %-d").to_string(),
    }
}

/// True once `date` has passed.
pub fn is_overdue<Tz: TimeZone, Tz2: TimeZone>(date: &DateTime<Tz2>, now: &DateTime<Tz>) -> bool {
    date < now
}

/// True when `date` falls on `now`'s calendar day, in `now`'s zone.
pub fn is_today<Tz: TimeZone, Tz2: TimeZone>(date: &DateTime<Tz2>, now: &DateTime<Tz>) -> bool {
    date.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

/// True when `now <= date <= now + days` calendar days.
pub fn is_within_days<Tz: TimeZone, Tz2: TimeZone>(
    date: &DateTime<Tz2>,
    days: u32,
    now: &DateTime<Tz>,
) -> bool {
    match now.clone().checked_add_days(Days::new(u64::from(days))) {
        Some(horizon) => date >= now && date <= &horizon,
        None => false,
    }
}
