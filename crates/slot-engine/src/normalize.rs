//! Parse raw free/busy entries into absolute-time busy intervals.
//!
//! Calendar providers report busy periods as pairs of datetime strings in a
//! handful of encodings: RFC 3339 with a `Z` suffix, RFC 3339 with an explicit
//! offset, compact `+HHMM` offsets, and offset-less local strings. All of them
//! are converted to `DateTime<Utc>`. Offset-less values are taken to be UTC.
//!
//! Malformed entries are skipped one at a time and never abort normalization.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::BusyInterval;

/// One busy entry as reported by a calendar provider.
///
/// Both fields are optional so that entries with missing keys still
/// deserialize and can be skipped during normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBusyEntry {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl RawBusyEntry {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }
}

/// Outcome of normalizing a batch of raw entries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub intervals: Vec<BusyInterval>,
    pub skipped: usize,
}

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z", "%Y-%m-%d %H:%M:%S%.f%z"];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a single datetime string into an absolute instant.
///
/// Returns `None` when the string matches none of the accepted encodings.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    // RFC 3339 covers both the `Z` marker and `+HH:MM` offsets.
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt.with_timezone(&Utc));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    // All-day busy blocks are sometimes reported as bare dates.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|ndt| ndt.and_utc())
}

fn parse_entry(entry: &RawBusyEntry) -> Option<BusyInterval> {
    let start = parse_instant(entry.start.as_deref()?)?;
    let end = parse_instant(entry.end.as_deref()?)?;
    BusyInterval::new(start, end)
}

/// Normalize raw entries, reporting how many were skipped.
pub fn normalize_entries(entries: &[RawBusyEntry]) -> Normalized {
    let mut out = Normalized::default();
    for entry in entries {
        match parse_entry(entry) {
            Some(interval) => out.intervals.push(interval),
            None => {
                tracing::warn!(
                    start = ?entry.start,
                    end = ?entry.end,
                    "Skipping malformed busy entry"
                );
                out.skipped += 1;
            }
        }
    }
    out
}

/// Normalize raw entries into busy intervals. Output order is not guaranteed.
pub fn normalize_busy(entries: &[RawBusyEntry]) -> Vec<BusyInterval> {
    normalize_entries(entries).intervals
}

/// Leniently read a JSON array of busy entries.
///
/// Elements that are not objects with string `start`/`end` fields become empty
/// entries, which the normalizer then skips. Only a document that is not a JSON
/// array at all is an error.
pub fn entries_from_json(value: &serde_json::Value) -> Option<Vec<RawBusyEntry>> {
    let items = value.as_array()?;
    Some(
        items
            .iter()
            .map(|item| serde_json::from_value(item.clone()).unwrap_or_default())
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn compact_offset_is_accepted() {
        let dt = parse_instant("2026-03-16T12:30:00+0330").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 16, 9, 0, 0).unwrap());
    }

    #[test]
    fn minutes_only_naive_is_utc() {
        let dt = parse_instant("2026-03-16T09:15").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 3, 16, 9, 15, 0).unwrap());
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_instant("tomorrow-ish").is_none());
        assert!(parse_instant("   ").is_none());
        assert!(parse_instant("2026-13-01T00:00:00Z").is_none());
    }
}
