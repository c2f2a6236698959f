//! Working-window resolution: local wall-clock day boundaries to absolute time.
//!
//! The working day is defined in the meeting's timezone, so the same hours
//! map to different UTC instants depending on the zone and on DST.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::types::{DayWindow, WorkingWindow};

/// Resolve an IANA timezone name, falling back to UTC when it is unknown.
pub fn resolve_timezone(name: &str) -> Tz {
    match name.trim().parse::<Tz>() {
        Ok(tz) => tz,
        Err(_) => {
            tracing::warn!(timezone = %name, "Unknown timezone, falling back to UTC");
            Tz::UTC
        }
    }
}

/// Map a local wall-clock time in `tz` to an absolute instant.
///
/// Ambiguous times (DST fall-back) resolve to the earlier instant. Times that
/// do not exist (DST spring-forward gap) resolve to the first instant after
/// the gap.
pub fn local_to_utc(tz: &Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // Walk forward minute by minute; real-world gaps are at most a few hours.
            let mut probe = naive;
            for _ in 0..(24 * 60) {
                probe += Duration::minutes(1);
                if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
                    return dt.with_timezone(&Utc);
                }
            }
            naive.and_utc()
        }
    }
}

fn local_hour(tz: &Tz, date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour.min(23), 0, 0).unwrap_or_default();
    local_to_utc(tz, date.and_time(time))
}

/// Compute the working window `[start_hour:00, end_hour:00)` on `date` in `tz`.
///
/// Callers must ensure `start_hour < end_hour`; this function does not
/// validate the precondition.
pub fn working_window(date: NaiveDate, tz: &Tz, start_hour: u32, end_hour: u32) -> WorkingWindow {
    WorkingWindow {
        start: local_hour(tz, date, start_hour),
        end: local_hour(tz, date, end_hour),
    }
}

/// The whole local calendar day `[00:00, next day 00:00)` in `tz`.
///
/// Used as the range for busy-data fetches.
pub fn day_window(date: NaiveDate, tz: &Tz) -> DayWindow {
    let next = date.succ_opt().unwrap_or(date);
    DayWindow {
        start: local_to_utc(tz, date.and_time(NaiveTime::default())),
        end: local_to_utc(tz, next.and_time(NaiveTime::default())),
    }
}
