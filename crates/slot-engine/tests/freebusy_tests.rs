//! Tests for busy-interval merging and free-window extraction.

use chrono::{DateTime, TimeZone, Utc};
use slot_engine::freebusy::free_windows;
use slot_engine::merge::{clip_to_window, merge_busy_intervals};
use slot_engine::{BusyInterval, WorkingWindow};

/// Helper: an instant on 2026-03-16 (UTC).
fn at(hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 16, hour, min, 0).unwrap()
}

fn busy(sh: u32, sm: u32, eh: u32, em: u32) -> BusyInterval {
    BusyInterval::new(at(sh, sm), at(eh, em)).unwrap()
}

/// The default 08:00-21:00 working window in UTC.
fn window() -> WorkingWindow {
    WorkingWindow {
        start: at(8, 0),
        end: at(21, 0),
    }
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

#[test]
fn non_positive_intervals_are_rejected() {
    assert!(BusyInterval::new(at(9, 0), at(9, 0)).is_none());
    assert!(BusyInterval::new(at(10, 0), at(9, 0)).is_none());
}

#[test]
fn overlapping_intervals_merge() {
    let merged = merge_busy_intervals(&[busy(9, 0, 10, 0), busy(9, 30, 10, 30)], &window(), 0);
    assert_eq!(merged, vec![busy(9, 0, 10, 30)]);
}

#[test]
fn touching_intervals_merge() {
    let merged = merge_busy_intervals(&[busy(10, 0, 11, 0), busy(9, 0, 10, 0)], &window(), 0);
    assert_eq!(merged, vec![busy(9, 0, 11, 0)]);
}

#[test]
fn contained_interval_is_absorbed() {
    let merged = merge_busy_intervals(&[busy(9, 0, 12, 0), busy(10, 0, 11, 0)], &window(), 0);
    assert_eq!(merged, vec![busy(9, 0, 12, 0)]);
}

#[test]
fn separate_intervals_stay_separate_and_sorted() {
    let merged = merge_busy_intervals(
        &[busy(14, 0, 15, 0), busy(9, 0, 10, 0), busy(11, 0, 12, 0)],
        &window(),
        0,
    );
    assert_eq!(
        merged,
        vec![busy(9, 0, 10, 0), busy(11, 0, 12, 0), busy(14, 0, 15, 0)]
    );
}

#[test]
fn intervals_are_clipped_to_the_window() {
    let input = [
        busy(6, 0, 9, 0),   // starts before
        busy(20, 0, 23, 0), // ends after
        busy(1, 0, 7, 0),   // entirely before
        busy(21, 0, 22, 0), // starts exactly at window end
    ];
    let clipped = clip_to_window(&input, &window());
    assert_eq!(clipped, vec![busy(8, 0, 9, 0), busy(20, 0, 21, 0)]);

    let merged = merge_busy_intervals(&input, &window(), 0);
    assert_eq!(merged, vec![busy(8, 0, 9, 0), busy(20, 0, 21, 0)]);
}

#[test]
fn input_order_does_not_matter() {
    let a = [busy(9, 0, 10, 0), busy(9, 45, 11, 0), busy(13, 0, 14, 0)];
    let b = [busy(13, 0, 14, 0), busy(9, 45, 11, 0), busy(9, 0, 10, 0)];
    assert_eq!(
        merge_busy_intervals(&a, &window(), 0),
        merge_busy_intervals(&b, &window(), 0)
    );
}

#[test]
fn empty_input_merges_to_nothing() {
    assert!(merge_busy_intervals(&[], &window(), 0).is_empty());
}

// ---------------------------------------------------------------------------
// Free windows
// ---------------------------------------------------------------------------

#[test]
fn no_busy_means_whole_window_free() {
    let free = free_windows(&window(), &[]);
    assert_eq!(free.len(), 1);
    assert_eq!(free[0].start, at(8, 0));
    assert_eq!(free[0].end, at(21, 0));
    assert_eq!(free[0].duration_minutes, 780);
}

#[test]
fn gaps_before_between_and_after() {
    let merged = [busy(9, 0, 10, 0), busy(14, 0, 15, 0)];
    let free = free_windows(&window(), &merged);

    assert_eq!(free.len(), 3);
    assert_eq!((free[0].start, free[0].end), (at(8, 0), at(9, 0)));
    assert_eq!((free[1].start, free[1].end), (at(10, 0), at(14, 0)));
    assert_eq!((free[2].start, free[2].end), (at(15, 0), at(21, 0)));
    assert_eq!(free[1].duration_minutes, 240);
}

#[test]
fn busy_at_window_edges_leaves_no_edge_gaps() {
    let merged = [busy(8, 0, 9, 0), busy(20, 0, 21, 0)];
    let free = free_windows(&window(), &merged);
    assert_eq!(free.len(), 1);
    assert_eq!((free[0].start, free[0].end), (at(9, 0), at(20, 0)));
}

#[test]
fn fully_busy_window_has_no_free_time() {
    let free = free_windows(&window(), &[busy(8, 0, 21, 0)]);
    assert!(free.is_empty());
}

#[test]
fn empty_window_has_no_free_time() {
    let inverted = WorkingWindow {
        start: at(21, 0),
        end: at(8, 0),
    };
    assert!(free_windows(&inverted, &[]).is_empty());
}

#[test]
fn free_and_busy_tile_the_window() {
    let merged = merge_busy_intervals(
        &[busy(7, 0, 9, 30), busy(12, 0, 13, 0), busy(12, 30, 14, 0), busy(20, 15, 22, 0)],
        &window(),
        0,
    );
    let free = free_windows(&window(), &merged);

    let busy_minutes: i64 = merged.iter().map(|b| (b.end - b.start).num_minutes()).sum();
    let free_minutes: i64 = free.iter().map(|f| f.duration_minutes).sum();
    assert_eq!(busy_minutes + free_minutes, window().duration_minutes());
}
