//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against a throwaway HOME so config files
//! never touch the real user directory.

use std::path::Path;
use std::process::Command;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};

use tempfile::TempDir;

const NOW: &str = "2026-10-16T20:15:00+09:00";

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(home: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_in_zone(home, "UTC", args)
}

/// Run a CLI command with the local time zone set through `TZ`.
fn run_cli_in_zone(home: &Path, zone: &str, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_lifeos"))
        .args(args)
        .env("HOME", home)
        .env("TZ", zone)
        .env_remove("LIFEOS_ENV")
        .env_remove("LIFEOS_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is not JSON")
}

#[test]
fn test_tier_lookup() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(home.path(), &["tier", "lookup", "65"]);
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["tier"], "close");
    assert_eq!(parsed["label"], "Close");
}

#[test]
fn test_tier_lookup_rejects_out_of_range() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(home.path(), &["tier", "lookup", "101"]);
    assert_ne!(code, 0);
}

#[test]
fn test_tier_score_from_file() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("interactions.json");
    std::fs::write(
        &file,
        r#"[
            {"occurred_at": "2026-10-16T09:00:00Z", "duration_minutes": 30},
            {"occurred_at": "2026-10-10T09:00:00Z", "duration_minutes": null}
        ]"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(
        home.path(),
        &["tier", "score", file.to_str().unwrap(), "--now", "2026-10-16T12:00:00Z"],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["interaction_count"], 2);
    assert_eq!(parsed["total_interaction_minutes"], 30);
    assert!(parsed["tier_score"].as_u64().unwrap() > 0);
}

#[test]
fn test_streak_calc() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "streak", "calc", "2026-10-14", "2026-10-16", "2026-10-15", "--today", "2026-10-16",
        ],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["current_streak"], 3);
    assert_eq!(parsed["longest_streak"], 3);
    assert_eq!(parsed["is_completed_today"], true);
    assert_eq!(parsed["is_streak_at_risk"], false);
    assert_eq!(parsed["display"], "3 days");
    assert_eq!(parsed["milestone"]["next_milestone"], 7);
}

#[test]
fn test_streak_calc_rejects_bad_date() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["streak", "calc", "2026/10/16", "--today", "2026-10-16"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_date_parse_tomorrow() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["date", "parse", "call mom tomorrow", "--now", NOW],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["original_text"], "tomorrow");
    assert!(parsed["date"]
        .as_str()
        .unwrap()
        .starts_with("2026-10-17T23:59:59"));
}

#[test]
fn test_date_parse_no_match_prints_null() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["date", "parse", "nothing to see here", "--now", NOW],
    );
    assert_eq!(code, 0);
    assert!(json(&stdout).is_null());
}

#[test]
fn test_date_parse_rejects_bad_now() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(
        home.path(),
        &["date", "parse", "tomorrow", "--now", "yesterday-ish"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid --now"));
}

#[test]
fn test_date_extract_multiple() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["date", "extract", "draft today, review friday", "--now", NOW],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    let dates = parsed.as_array().unwrap();
    assert_eq!(dates.len(), 2);
}

#[test]
fn test_date_relative() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &["date", "relative", "2026-10-15T10:00:00+09:00", "--now", NOW],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["label"], "Yesterday");
    assert_eq!(parsed["overdue"], true);
    assert_eq!(parsed["today"], false);
}

#[test]
fn test_thought_capture() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli(
        home.path(),
        &[
            "thought", "capture", "  book flights next week  ", "--project", "trip", "--now", NOW,
        ],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["content"], "book flights next week");
    assert_eq!(parsed["project_id"], "trip");
    assert_eq!(parsed["due_date_text"], "next week");
    assert!(parsed["due_date"].is_string());
}

#[test]
fn test_thought_capture_rejects_blank() {
    let home = TempDir::new().unwrap();
    let (code, _, stderr) = run_cli(home.path(), &["thought", "capture", "   "]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Content is required"));
}

#[test]
fn test_snapshot_report() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("snapshot.json");
    std::fs::write(
        &file,
        r#"{
            "contacts": [{"id": "c1", "name": "Ada"}],
            "habits": [{"id": "h1", "name": "Read"}],
            "completions": [
                {"habit_id": "h1", "completed_date": "2026-10-15"},
                {"habit_id": "h1", "completed_date": "2026-10-14"}
            ]
        }"#,
    )
    .unwrap();

    let (code, stdout, _) = run_cli(
        home.path(),
        &["snapshot", "report", file.to_str().unwrap(), "--now", NOW],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["contacts"][0]["tier"], "dormant");
    assert_eq!(parsed["contacts"][0]["tier_score"], 0);
    assert_eq!(parsed["habits"][0]["current_streak"], 2);
    assert_eq!(parsed["habits"][0]["is_streak_at_risk"], true);
}

#[test]
fn test_snapshot_report_unknown_contact() {
    let home = TempDir::new().unwrap();
    let file = home.path().join("snapshot.json");
    std::fs::write(
        &file,
        r#"{"interactions": [{"contact_id": "ghost", "occurred_at": "2026-10-16T00:00:00Z"}]}"#,
    )
    .unwrap();

    let (code, _, _) = run_cli(
        home.path(),
        &["snapshot", "report", file.to_str().unwrap(), "--now", NOW],
    );
    assert_eq!(code, 1);
}

#[test]
fn test_config_set_get_roundtrip() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "tier.recency_decay", "0.9"]);
    assert_eq!(code, 0);

    let (code, stdout, _) = run_cli(home.path(), &["config", "get", "tier.recency_decay"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "0.9");

    let config_file = home.path().join(".config/lifeos/config.toml");
    assert!(config_file.exists());
}

#[test]
fn test_config_set_rejects_invalid() {
    let home = TempDir::new().unwrap();
    let (code, _, _) = run_cli(home.path(), &["config", "set", "tier.recency_decay", "2"]);
    assert_eq!(code, 1);
    let (code, _, _) = run_cli(home.path(), &["config", "set", "tier.nope", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_reset_and_path() {
    let home = TempDir::new().unwrap();
    let _ = run_cli(home.path(), &["config", "set", "habits.history_days", "30"]);
    let (code, _, _) = run_cli(home.path(), &["config", "reset"]);
    assert_eq!(code, 0);

    let (_, stdout, _) = run_cli(home.path(), &["config", "get", "habits.history_days"]);
    assert_eq!(stdout.trim(), "365");

    let (code, stdout, _) = run_cli(home.path(), &["config", "path"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("config.toml"));
}

/// Last Sunday of `month` in `year`.
fn last_sunday(year: i32, month: u32) -> NaiveDate {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    let mut day = first_of_next - Duration::days(1);
    while day.weekday() != Weekday::Sun {
        day -= Duration::days(1);
    }
    day
}

/// Europe/Berlin UTC offset in seconds at 23:59 local on `date`.
fn berlin_evening_offset(date: NaiveDate) -> i32 {
    let summer = date >= last_sunday(date.year(), 3) && date < last_sunday(date.year(), 10);
    if summer {
        2 * 3600
    } else {
        3600
    }
}

#[test]
fn test_date_parse_without_now_uses_local_zone_per_date() {
    let home = TempDir::new().unwrap();
    for (text, expected) in [
        ("january 15, 2030", "2030-01-15T23:59:59.999+01:00"),
        ("july 15, 2030", "2030-07-15T23:59:59.999+02:00"),
    ] {
        let (code, stdout, _) =
            run_cli_in_zone(home.path(), "Europe/Berlin", &["date", "parse", text]);
        assert_eq!(code, 0);
        assert_eq!(json(&stdout)["date"], expected, "{text}");
    }
}

#[test]
fn test_date_parse_without_now_keeps_end_of_day_across_dst() {
    let home = TempDir::new().unwrap();
    for text in ["in 1 month", "in 6 months", "in 3 weeks"] {
        let (code, stdout, _) =
            run_cli_in_zone(home.path(), "Europe/Berlin", &["date", "parse", text]);
        assert_eq!(code, 0);
        let raw = json(&stdout)["date"].as_str().unwrap().to_string();
        let date = DateTime::parse_from_rfc3339(&raw).unwrap();
        assert_eq!(date.format("%H:%M:%S%.3f").to_string(), "23:59:59.999", "{text}");
        assert_eq!(
            date.offset().local_minus_utc(),
            berlin_evening_offset(date.date_naive()),
            "{text} resolved to {raw}"
        );
    }
}

#[test]
fn test_thought_capture_without_now_stores_local_end_of_day() {
    let home = TempDir::new().unwrap();
    let (code, stdout, _) = run_cli_in_zone(
        home.path(),
        "Europe/Berlin",
        &["thought", "capture", "renew passport by january 15, 2030"],
    );
    assert_eq!(code, 0);
    let parsed = json(&stdout);
    assert_eq!(parsed["due_date_text"], "january 15, 2030");
    let due = DateTime::parse_from_rfc3339(parsed["due_date"].as_str().unwrap()).unwrap();
    assert_eq!(due, DateTime::parse_from_rfc3339("2030-01-15T22:59:59.999Z").unwrap());
}
