//! Tests for working-window resolution across timezones and DST.

use chrono::{NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use slot_engine::window::{day_window, resolve_timezone, working_window};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn utc_window_is_identity() {
    let w = working_window(date(2026, 3, 16), &Tz::UTC, 8, 21);
    assert_eq!(w.start, Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap());
    assert_eq!(w.end, Utc.with_ymd_and_hms(2026, 3, 16, 21, 0, 0).unwrap());
    assert_eq!(w.duration_minutes(), 13 * 60);
}

#[test]
fn half_hour_offset_zone() {
    // Tehran is UTC+03:30 year-round.
    let tz = resolve_timezone("Asia/Tehran");
    let w = working_window(date(2026, 3, 16), &tz, 8, 21);
    assert_eq!(w.start, Utc.with_ymd_and_hms(2026, 3, 16, 4, 30, 0).unwrap());
    assert_eq!(w.end, Utc.with_ymd_and_hms(2026, 3, 16, 17, 30, 0).unwrap());
}

#[test]
fn same_hours_shift_with_dst() {
    let tz = resolve_timezone("America/New_York");

    // EST (UTC-5) before the March transition.
    let winter = working_window(date(2026, 3, 6), &tz, 9, 17);
    assert_eq!(winter.start, Utc.with_ymd_and_hms(2026, 3, 6, 14, 0, 0).unwrap());

    // EDT (UTC-4) after it.
    let summer = working_window(date(2026, 3, 10), &tz, 9, 17);
    assert_eq!(summer.start, Utc.with_ymd_and_hms(2026, 3, 10, 13, 0, 0).unwrap());
}

#[test]
fn date_line_zone_maps_to_previous_utc_day() {
    let tz = resolve_timezone("Pacific/Auckland");
    // March 16 is still NZDT (UTC+13).
    let w = working_window(date(2026, 3, 16), &tz, 8, 21);
    assert_eq!(w.start, Utc.with_ymd_and_hms(2026, 3, 15, 19, 0, 0).unwrap());
}

#[test]
fn unknown_timezone_falls_back_to_utc() {
    let tz = resolve_timezone("Mars/Olympus_Mons");
    assert_eq!(tz, Tz::UTC);

    let w = working_window(date(2026, 3, 16), &tz, 8, 21);
    assert_eq!(w.start, Utc.with_ymd_and_hms(2026, 3, 16, 8, 0, 0).unwrap());
}

#[test]
fn timezone_name_is_trimmed() {
    assert_eq!(resolve_timezone("  Europe/London "), Tz::Europe__London);
}

#[test]
fn day_window_spans_local_midnights() {
    let tz = resolve_timezone("Asia/Tehran");
    let day = day_window(date(2026, 3, 16), &tz);
    assert_eq!(day.start, Utc.with_ymd_and_hms(2026, 3, 15, 20, 30, 0).unwrap());
    assert_eq!(day.end, Utc.with_ymd_and_hms(2026, 3, 16, 20, 30, 0).unwrap());
}

#[test]
fn day_window_is_23_hours_on_spring_forward() {
    let tz = resolve_timezone("America/New_York");
    let day = day_window(date(2026, 3, 8), &tz);
    assert_eq!(day.duration_minutes(), 23 * 60);
}
