//! Interval types shared by every stage of the slot pipeline.
//!
//! All instants are absolute (`DateTime<Utc>`) until the final stage, where
//! candidate slots are localized to the target timezone for presentation.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// A period during which a participant is unavailable. Always `end > start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BusyInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusyInterval {
    /// Build an interval, returning `None` when it has no positive duration.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<Self> {
        (end > start).then_some(Self { start, end })
    }
}

/// Working-hours boundary of one calendar day in one timezone, in absolute time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl WorkingWindow {
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// A whole local day, `[00:00, next 00:00)`, in absolute time. Busy data is
/// fetched over this range.
pub type DayWindow = WorkingWindow;

/// A free gap inside the working window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub duration_minutes: i64,
}

/// A bookable fixed-length slot, localized to the target timezone.
///
/// Equality and ordering of `DateTime<Tz>` compare the underlying instants,
/// so slots in different zones for the same moment compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSlot {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl CandidateSlot {
    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    pub fn timezone(&self) -> Tz {
        self.start.timezone()
    }
}
