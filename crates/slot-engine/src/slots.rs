//! Discretize free windows into fixed-length candidate slots.

use chrono::{DateTime, Duration, DurationRound, Utc};
use chrono_tz::Tz;

use crate::types::{CandidateSlot, FreeWindow};

/// Round an instant up to the next whole minute; whole minutes are unchanged.
pub fn ceil_to_minute(t: DateTime<Utc>) -> DateTime<Utc> {
    match t.duration_trunc(Duration::minutes(1)) {
        Ok(floor) if floor == t => t,
        Ok(floor) => floor + Duration::minutes(1),
        Err(_) => t,
    }
}

/// The effective step: the requested one when positive, otherwise the duration.
pub fn effective_step(duration_minutes: i64, step_minutes: Option<i64>) -> i64 {
    match step_minutes {
        Some(step) if step > 0 => step,
        _ => duration_minutes,
    }
}

/// Generate candidate slots of `duration_minutes` every `step_minutes` inside
/// each free window, localized to `tz`.
///
/// Slots keep window order and are chronological within a window. A
/// non-positive duration, or one longer than every free window, yields no
/// slots; a missing or non-positive step produces back-to-back slots.
pub fn generate_slots(
    free: &[FreeWindow],
    duration_minutes: i64,
    step_minutes: Option<i64>,
    tz: &Tz,
) -> Vec<CandidateSlot> {
    let longest = free.iter().map(|w| w.duration_minutes).max().unwrap_or(0);
    if duration_minutes <= 0 || duration_minutes > longest {
        return Vec::new();
    }
    let Some(duration) = Duration::try_minutes(duration_minutes) else {
        return Vec::new();
    };
    // A step longer than any window can only ever yield one slot per window.
    let step_minutes = effective_step(duration_minutes, step_minutes).min(longest + 1);
    let Some(step) = Duration::try_minutes(step_minutes) else {
        return Vec::new();
    };

    let mut slots = Vec::new();
    for window in free {
        let mut current = ceil_to_minute(window.start);
        while let Some(end) = current.checked_add_signed(duration) {
            if end > window.end {
                break;
            }
            slots.push(CandidateSlot {
                start: current.with_timezone(tz),
                end: end.with_timezone(tz),
            });
            match current.checked_add_signed(step) {
                Some(next) => current = next,
                None => break,
            }
        }
    }
    slots
}
