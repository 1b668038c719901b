//! Natural-language due-date parsing.
//!
//! Converts expressions like "tomorrow", "next Friday", "in 2 days" or
//! "March 5th" into concrete dates. Patterns are tried in priority order and
//! the first one that resolves wins. Every resolved date lands on 23:59:59.999
//! of its calendar day in the zone of the reference instant.

use std::collections::HashSet;
use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone};
use regex::{Captures, Match, Regex};
use serde::Serialize;

const WEEKDAYS: [&str; 7] = [
    "sunday",
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
];

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Confidence for relative keywords, offsets and period expressions.
pub const RELATIVE_CONFIDENCE: f64 = 0.9;
/// Confidence for weekday names.
pub const WEEKDAY_CONFIDENCE: f64 = 0.85;
/// Confidence for month-name dates.
pub const MONTH_DAY_CONFIDENCE: f64 = 0.8;
/// Confidence for numeric `MM/DD[/YY]` dates.
pub const NUMERIC_CONFIDENCE: f64 = 0.75;

/// Which family of expression produced a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// today, tomorrow, yesterday
    Keyword,
    /// in 3 days, 2 weeks from now
    Offset,
    /// next week, end of month, by tomorrow
    Period,
    Weekday,
    MonthDay,
    Numeric,
}

/// A date found in free text.
#[derive(Debug, Clone, Serialize)]
#[serde(bound(serialize = ""))]
pub struct ParsedDate<Tz: TimeZone> {
    pub date: DateTime<Tz>,
    /// The matched expression exactly as written.
    pub original_text: String,
    /// Heuristic certainty in 0..=1, reflecting pattern specificity.
    pub confidence: f64,
    pub kind: PatternKind,
}

type Resolver = fn(&Captures<'_>, NaiveDate) -> Option<NaiveDate>;
type SkipRule = fn(&str, &Match<'_>) -> bool;

struct DatePattern {
    kind: PatternKind,
    regex: Regex,
    confidence: f64,
    resolve: Resolver,
    /// Matches this returns true for are not considered at all.
    skip: Option<SkipRule>,
}

impl DatePattern {
    fn new(kind: PatternKind, source: &str, confidence: f64, resolve: Resolver) -> Self {
        Self {
            kind,
            regex: Regex::new(source).expect("date pattern must compile"),
            confidence,
            resolve,
            skip: None,
        }
    }

    fn skipping(mut self, rule: SkipRule) -> Self {
        self.skip = Some(rule);
        self
    }

    /// Matches in `text`, leftmost first, minus skipped ones.
    fn accepted<'t>(&'t self, text: &'t str) -> impl Iterator<Item = Captures<'t>> + 't {
        self.regex.captures_iter(text).filter(move |caps| match (self.skip, caps.get(0)) {
            (Some(rule), Some(m)) => !rule(text, &m),
            _ => true,
        })
    }
}

static FROM_BEFORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfrom\s+$").expect("date pattern must compile"));

static PATTERNS: LazyLock<Vec<DatePattern>> = LazyLock::new(|| {
    let weekdays = WEEKDAYS.join("|");
    let months = MONTHS.join("|");

    vec![
        DatePattern::new(
            PatternKind::Keyword,
            r"(?i)\b(today|now|tonight)\b",
            RELATIVE_CONFIDENCE,
            |_, today| Some(today),
        )
        .skipping(is_from_now),
        DatePattern::new(
            PatternKind::Keyword,
            r"(?i)\btomorrow\b",
            RELATIVE_CONFIDENCE,
            |_, today| today.succ_opt(),
        ),
        DatePattern::new(
            PatternKind::Keyword,
            r"(?i)\byesterday\b",
            RELATIVE_CONFIDENCE,
            |_, today| today.pred_opt(),
        ),
        DatePattern::new(
            PatternKind::Offset,
            r"(?i)\bin\s+(\d+)\s+(day|days|week|weeks|month|months)\b",
            RELATIVE_CONFIDENCE,
            resolve_offset,
        ),
        DatePattern::new(
            PatternKind::Offset,
            r"(?i)\b(\d+)\s+(day|days|week|weeks)\s+(from\s+now|away)\b",
            RELATIVE_CONFIDENCE,
            resolve_offset,
        ),
        DatePattern::new(
            PatternKind::Period,
            r"(?i)\bnext\s+(week|month)\b",
            RELATIVE_CONFIDENCE,
            resolve_next_period,
        ),
        DatePattern::new(
            PatternKind::Period,
            r"(?i)\b(this|end\s+of(\s+this)?)\s+(week|month)\b",
            RELATIVE_CONFIDENCE,
            resolve_end_of_period,
        ),
        DatePattern::new(
            PatternKind::Period,
            r"(?i)\b(by|before)\s+(tomorrow|next\s+week)\b",
            RELATIVE_CONFIDENCE,
            resolve_deadline,
        ),
        DatePattern::new(
            PatternKind::Weekday,
            &format!(r"(?i)\b(next\s+)?({weekdays})\b"),
            WEEKDAY_CONFIDENCE,
            resolve_weekday,
        ),
        DatePattern::new(
            PatternKind::MonthDay,
            &format!(r"(?i)\b({months})\s+(\d{{1,2}})(?:st|nd|rd|th)?(?:\s*,?\s*(\d{{4}}))?\b"),
            MONTH_DAY_CONFIDENCE,
            resolve_month_day,
        ),
        DatePattern::new(
            PatternKind::Numeric,
            r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b",
            NUMERIC_CONFIDENCE,
            resolve_numeric,
        ),
    ]
});

/// The "now" in "3 days from now" belongs to the offset expression.
fn is_from_now(text: &str, m: &Match<'_>) -> bool {
    m.as_str().eq_ignore_ascii_case("now") && FROM_BEFORE.is_match(&text[..m.start()])
}

fn number(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

fn lower(caps: &Captures<'_>, group: usize) -> Option<String> {
    Some(caps.get(group)?.as_str().to_ascii_lowercase())
}

fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

fn resolve_offset(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let amount = number(caps, 1)?;
    let unit = lower(caps, 2)?;

    if unit.starts_with("day") {
        add_days(today, u64::from(amount))
    } else if unit.starts_with("week") {
        add_days(today, u64::from(amount) * 7)
    } else {
        today.checked_add_months(Months::new(amount))
    }
}

fn resolve_next_period(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    match lower(caps, 1)?.as_str() {
        "week" => add_days(today, 7),
        _ => today.checked_add_months(Months::new(1)),
    }
}

fn resolve_end_of_period(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    match lower(caps, 3)?.as_str() {
        // Weeks end on Sunday; on a Sunday this rolls to the following one.
        "week" => add_days(today, 7 - u64::from(today.weekday().num_days_from_sunday())),
        _ => today
            .with_day(1)?
            .checked_add_months(Months::new(1))?
            .pred_opt(),
    }
}

fn resolve_deadline(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    if lower(caps, 2)?.contains("week") {
        add_days(today, 7)
    } else {
        today.succ_opt()
    }
}

fn resolve_weekday(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let is_next = caps.get(1).is_some();
    let name = lower(caps, 2)?;
    let target = WEEKDAYS.iter().position(|d| *d == name)? as i64;
    let current = i64::from(today.weekday().num_days_from_sunday());

    let mut days_until = target - current;
    if days_until <= 0 || is_next {
        days_until += 7;
    }
    add_days(today, u64::try_from(days_until).ok()?)
}

fn resolve_month_day(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let name = lower(caps, 1)?;
    let month = MONTHS.iter().position(|m| *m == name)? as u32 + 1;
    let day = number(caps, 2)?;
    if !(1..=31).contains(&day) {
        return None;
    }

    match caps.get(3) {
        Some(year) => NaiveDate::from_ymd_opt(year.as_str().parse().ok()?, month, day),
        // Next occurrence from today on; Feb 29 waits for a leap year.
        None => (0..=8)
            .filter_map(|ahead| NaiveDate::from_ymd_opt(today.year() + ahead, month, day))
            .find(|date| *date >= today),
    }
}

fn resolve_numeric(caps: &Captures<'_>, today: NaiveDate) -> Option<NaiveDate> {
    let month = number(caps, 1)?;
    let day = number(caps, 2)?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let mut year = match caps.get(3) {
        Some(y) => y.as_str().parse::<i32>().ok()?,
        None => today.year(),
    };
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 23:59:59.999 on `date` in `tz`.
///
/// Returns `None` only when that wall-clock time does not exist in `tz`.
pub fn end_of_day<Tz: TimeZone>(date: NaiveDate, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = date.and_hms_milli_opt(23, 59, 59, 999)?;
    tz.from_local_datetime(&naive).earliest()
}

fn resolve_first<Tz: TimeZone>(
    pattern: &DatePattern,
    text: &str,
    now: &DateTime<Tz>,
) -> Option<ParsedDate<Tz>> {
    let caps = pattern.accepted(text).next()?;
    let matched = caps.get(0)?;
    let day = (pattern.resolve)(&caps, now.date_naive())?;
    let date = end_of_day(day, &now.timezone())?;

    Some(ParsedDate {
        date,
        original_text: matched.as_str().to_string(),
        confidence: pattern.confidence,
        kind: pattern.kind,
    })
}

/// Parse the highest-priority date expression in `text`, relative to `now`.
///
/// Returns `None` when no expression is found; that is not an error.
pub fn parse_natural_date<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> Option<ParsedDate<Tz>> {
    let parsed = PATTERNS
        .iter()
        .find_map(|pattern| resolve_first(pattern, text, now))?;

    tracing::debug!(
        matched = %parsed.original_text,
        kind = ?parsed.kind,
        date = %parsed.date.date_naive(),
        "parsed natural date"
    );
    Some(parsed)
}

/// Every date expression in `text`, highest confidence first.
///
/// Each pattern is applied across the whole text. Matches are deduplicated
/// case-insensitively by their text and each is resolved on its own with
/// [`parse_natural_date`].
pub fn extract_all_dates<Tz: TimeZone>(text: &str, now: &DateTime<Tz>) -> Vec<ParsedDate<Tz>> {
    let mut seen_matches = HashSet::new();
    let mut seen_results = HashSet::new();
    let mut dates = Vec::new();

    for pattern in PATTERNS.iter() {
        for caps in pattern.accepted(text) {
            let Some(matched) = caps.get(0) else {
                continue;
            };
            if !seen_matches.insert(matched.as_str().to_lowercase()) {
                continue;
            }
            let Some(parsed) = parse_natural_date(matched.as_str(), now) else {
                continue;
            };
            if seen_results.insert(parsed.original_text.to_lowercase()) {
                dates.push(parsed);
            }
        }
    }

    dates.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    dates
}
