//! Compute free windows from merged busy intervals.
//!
//! Walks the merged busy list once and emits every positive-length gap inside
//! the working window: before the first interval, between neighbours, and
//! after the last one.

use chrono::{DateTime, Utc};

use crate::types::{BusyInterval, FreeWindow, WorkingWindow};

fn gap(start: DateTime<Utc>, end: DateTime<Utc>) -> FreeWindow {
    FreeWindow {
        start,
        end,
        duration_minutes: (end - start).num_minutes(),
    }
}

/// Subtract merged busy intervals from the working window.
///
/// `merged` must be ascending and disjoint, as produced by
/// [`crate::merge::merge_busy_intervals`]. With no busy intervals the whole
/// window is a single free window. An empty window yields nothing.
pub fn free_windows(window: &WorkingWindow, merged: &[BusyInterval]) -> Vec<FreeWindow> {
    if window.start >= window.end {
        return Vec::new();
    }

    let mut free = Vec::new();
    let mut cursor = window.start;

    for busy in merged {
        let busy_start = busy.start.min(window.end);
        if cursor < busy_start {
            free.push(gap(cursor, busy_start));
        }
        cursor = cursor.max(busy.end);
    }

    // Trailing free window after the last busy period.
    if cursor < window.end {
        free.push(gap(cursor, window.end));
    }

    free
}
