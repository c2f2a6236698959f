//! Merge busy intervals from any number of participants.
//!
//! Intervals are clipped to the working window, sorted by start time, then
//! merged left to right. Touching intervals (`start == running end`) merge.
//! A positive margin also merges intervals separated by a gap no longer than
//! the margin.

use chrono::Duration;

use crate::types::{BusyInterval, WorkingWindow};

/// Clip busy intervals to the window, discarding those entirely outside it.
pub fn clip_to_window(intervals: &[BusyInterval], window: &WorkingWindow) -> Vec<BusyInterval> {
    intervals
        .iter()
        .filter(|i| i.start < window.end && i.end > window.start)
        .map(|i| BusyInterval {
            start: i.start.max(window.start),
            end: i.end.min(window.end),
        })
        .collect()
}

/// Clip, sort and merge busy intervals into an ascending, disjoint list.
///
/// `margin_minutes` widens the merge condition to
/// `start <= running_end + margin`; zero means exact adjacency only. Negative
/// margins are treated as zero.
pub fn merge_busy_intervals(
    intervals: &[BusyInterval],
    window: &WorkingWindow,
    margin_minutes: i64,
) -> Vec<BusyInterval> {
    let mut clipped = clip_to_window(intervals, window);
    if clipped.is_empty() {
        return Vec::new();
    }

    // Stable sort on (start, end) so the result is independent of input order.
    clipped.sort_by_key(|i| (i.start, i.end));

    // No gap inside the window is longer than the window itself.
    let span = window.end - window.start;
    let margin = Duration::try_minutes(margin_minutes.max(0)).map_or(span, |m| m.min(span));
    let mut merged: Vec<BusyInterval> = Vec::with_capacity(clipped.len());
    for interval in clipped {
        if let Some(last) = merged.last_mut() {
            if interval.start - last.end <= margin {
                last.end = last.end.max(interval.end);
                continue;
            }
        }
        merged.push(interval);
    }

    merged
}
