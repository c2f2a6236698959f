//! Detect busy intervals that overlap a chosen slot.
//!
//! Adjacent intervals (one ends exactly when the other starts) are NOT conflicts.

use chrono::{DateTime, Utc};

use crate::types::{BusyInterval, CandidateSlot};

/// A busy interval overlapping a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub busy: BusyInterval,
    pub overlap_minutes: i64,
}

/// Find every busy interval overlapping `[start, end)`.
///
/// Two intervals overlap when `a.start < b.end && b.start < a.end`.
pub fn find_conflicts(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    busy: &[BusyInterval],
) -> Vec<Conflict> {
    busy.iter()
        .filter(|b| start < b.end && b.start < end)
        .map(|b| Conflict {
            busy: *b,
            overlap_minutes: (end.min(b.end) - start.max(b.start)).num_minutes(),
        })
        .collect()
}

/// Find every busy interval overlapping a candidate slot.
pub fn slot_conflicts(slot: &CandidateSlot, busy: &[BusyInterval]) -> Vec<Conflict> {
    find_conflicts(slot.start_utc(), slot.end_utc(), busy)
}
