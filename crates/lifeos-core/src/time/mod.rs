//! Due dates: natural-language parsing and relative display.

mod format;
mod parse;

pub use format::{format_relative_date, is_overdue, is_today, is_within_days};
pub use parse::{
    end_of_day, extract_all_dates, parse_natural_date, ParsedDate, PatternKind,
    MONTH_DAY_CONFIDENCE, NUMERIC_CONFIDENCE, RELATIVE_CONFIDENCE, WEEKDAY_CONFIDENCE,
};
