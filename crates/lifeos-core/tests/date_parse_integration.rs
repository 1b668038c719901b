//! Integration tests for natural-language date parsing.

use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, TimeZone, Utc, Weekday};
use lifeos_core::time::{
    format_relative_date, is_overdue, is_within_days, MONTH_DAY_CONFIDENCE, RELATIVE_CONFIDENCE,
    WEEKDAY_CONFIDENCE,
};
use lifeos_core::{extract_all_dates, parse_natural_date, NewThought};
use proptest::prelude::*;

// Friday evening in UTC+9.
fn now() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(9 * 3600)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 16, 20, 15, 0)
        .unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn tomorrow_at_end_of_day() {
    let parsed = parse_natural_date("tomorrow", &now()).unwrap();
    assert_eq!(parsed.confidence, RELATIVE_CONFIDENCE);
    let expected = now()
        .timezone()
        .from_local_datetime(&day(2026, 10, 17).and_hms_milli_opt(23, 59, 59, 999).unwrap())
        .unwrap();
    assert_eq!(parsed.date, expected);
}

#[test]
fn next_friday_is_a_later_friday() {
    let parsed = parse_natural_date("next Friday", &now()).unwrap();
    assert_eq!(parsed.confidence, WEEKDAY_CONFIDENCE);
    assert_eq!(parsed.date.weekday(), Weekday::Fri);
    assert!(parsed.date.date_naive() > now().date_naive());
    assert_eq!(parsed.date.date_naive(), day(2026, 10, 23));
}

#[test]
fn in_three_days() {
    let parsed = parse_natural_date("in 3 days", &now()).unwrap();
    assert_eq!(parsed.date.date_naive(), day(2026, 10, 19));
}

#[test]
fn month_name_rolls_to_next_year_when_passed() {
    let parsed = parse_natural_date("March 5", &now()).unwrap();
    assert_eq!(parsed.confidence, MONTH_DAY_CONFIDENCE);
    assert_eq!(parsed.date.date_naive(), day(2027, 3, 5));

    let upcoming = parse_natural_date("November 5th", &now()).unwrap();
    assert_eq!(upcoming.date.date_naive(), day(2026, 11, 5));

    let same_day = parse_natural_date("October 16", &now()).unwrap();
    assert_eq!(same_day.date.date_naive(), day(2026, 10, 16));
}

#[test]
fn nothing_to_find() {
    assert!(parse_natural_date("no date here", &now()).is_none());
}

#[test]
fn extract_two_expressions() {
    let text = "Email Priya on Monday, then draft the report by March 5";
    let dates = extract_all_dates(text, &now());
    assert_eq!(dates.len(), 2);
    assert!(dates[0].confidence >= dates[1].confidence);
    for parsed in &dates {
        let alone = parse_natural_date(&parsed.original_text, &now()).unwrap();
        assert_eq!(alone.date, parsed.date);
        assert_eq!(alone.confidence, parsed.confidence);
    }
}

#[test]
fn captured_thought_shows_relative_label() {
    let thought = NewThought::capture("dentist tomorrow", None, &now()).unwrap();
    let due = thought.due_date.unwrap();
    assert_eq!(format_relative_date(&due, &now()), "Tomorrow");
    assert!(!is_overdue(&due, &now()));
    assert!(is_within_days(&due, 2, &now()));
    assert!(!is_within_days(&due, 0, &now()));
}

#[test]
fn stored_utc_due_date_is_labelled_in_local_zone() {
    // 2026-10-17 14:59:59 UTC is 23:59:59 on the 17th in UTC+9.
    let due = Utc.with_ymd_and_hms(2026, 10, 17, 14, 59, 59).unwrap();
    assert_eq!(format_relative_date(&due, &now()), "Tomorrow");
}

proptest! {
    #[test]
    fn in_n_days_matches_arithmetic(n in 0u32..3000) {
        let parsed = parse_natural_date(&format!("finish in {n} days"), &now()).unwrap();
        let expected = now().date_naive() + Duration::days(i64::from(n));
        prop_assert_eq!(parsed.date.date_naive(), expected);
    }

    #[test]
    fn weekdays_land_within_two_weeks(idx in 0usize..7, next in any::<bool>()) {
        let names = ["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];
        let text = if next { format!("next {}", names[idx]) } else { names[idx].to_string() };
        let parsed = parse_natural_date(&text, &now()).unwrap();
        let ahead = (parsed.date.date_naive() - now().date_naive()).num_days();
        prop_assert!((1..=14).contains(&ahead));
        prop_assert_eq!(parsed.date.weekday().num_days_from_sunday() as usize, idx);
    }

    #[test]
    fn parsed_dates_are_end_of_day(text in "(today|tomorrow|next week|in [0-9]{1,3} weeks|[1-9]/[1-2][0-9])") {
        if let Some(parsed) = parse_natural_date(&text, &now()) {
            let local = parsed.date.naive_local();
            prop_assert_eq!(local.time(), chrono::NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
        }
    }

    #[test]
    fn parser_never_panics(text in "\\PC{0,80}") {
        let _ = parse_natural_date(&text, &now());
        let _ = extract_all_dates(&text, &now());
    }
}
