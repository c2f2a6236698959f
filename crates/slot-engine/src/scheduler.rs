//! End-to-end slot computation across participants.
//!
//! Accepts raw busy data from N participants (one stream each), normalizes and
//! merges everything into a single busy view of the working window, then cuts
//! the remaining free time into candidate slots.
//!
//! Each call is an independent computation over the data passed in; no state
//! is shared between calls.

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::config::{
    validate_working_hours, SchedulerConfig, DEFAULT_WORK_END_HOUR, DEFAULT_WORK_START_HOUR,
};
use crate::error::{Result, SlotError};
use crate::freebusy::free_windows;
use crate::merge::merge_busy_intervals;
use crate::normalize::{normalize_entries, RawBusyEntry};
use crate::slots::generate_slots;
use crate::source::BusySource;
use crate::types::{BusyInterval, CandidateSlot, WorkingWindow};
use crate::window::{day_window, resolve_timezone, working_window};

/// Raw busy data for one participant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantBusy {
    pub participant: String,
    pub entries: Vec<RawBusyEntry>,
}

impl ParticipantBusy {
    pub fn new(participant: impl Into<String>, entries: Vec<RawBusyEntry>) -> Self {
        Self {
            participant: participant.into(),
            entries,
        }
    }
}

/// Parameters of one slot computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotQuery {
    pub date: NaiveDate,
    pub duration_minutes: i64,
    /// `None` or non-positive means back-to-back slots.
    pub step_minutes: Option<i64>,
    /// IANA timezone name; `None` or unknown names use UTC.
    pub timezone: Option<String>,
    pub work_start_hour: u32,
    pub work_end_hour: u32,
    pub merge_margin_minutes: i64,
}

impl SlotQuery {
    /// A query with 08:00-21:00 working hours, UTC, no margin.
    pub fn new(date: NaiveDate, duration_minutes: i64) -> Self {
        Self {
            date,
            duration_minutes,
            step_minutes: None,
            timezone: None,
            work_start_hour: DEFAULT_WORK_START_HOUR,
            work_end_hour: DEFAULT_WORK_END_HOUR,
            merge_margin_minutes: 0,
        }
    }

    /// A query whose defaults come from `config`.
    pub fn from_config(date: NaiveDate, duration_minutes: i64, config: &SchedulerConfig) -> Self {
        Self {
            date,
            duration_minutes,
            step_minutes: config.default_step_minutes,
            timezone: Some(config.default_timezone.clone()),
            work_start_hour: config.work_start_hour,
            work_end_hour: config.work_end_hour,
            merge_margin_minutes: config.merge_margin_minutes,
        }
    }

    pub fn step(mut self, step_minutes: i64) -> Self {
        self.step_minutes = Some(step_minutes);
        self
    }

    pub fn timezone(mut self, name: impl Into<String>) -> Self {
        self.timezone = Some(name.into());
        self
    }

    pub fn working_hours(mut self, start: u32, end: u32) -> Self {
        self.work_start_hour = start;
        self.work_end_hour = end;
        self
    }

    pub fn merge_margin(mut self, minutes: i64) -> Self {
        self.merge_margin_minutes = minutes;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.duration_minutes <= 0 {
            return Err(SlotError::InvalidDuration(self.duration_minutes));
        }
        validate_working_hours(self.work_start_hour, self.work_end_hour)
    }
}

/// A meeting the surrounding system wants slots for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingRequest {
    pub participants: Vec<String>,
    pub date: NaiveDate,
    pub duration_minutes: i64,
    #[serde(default)]
    pub step_minutes: Option<i64>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl MeetingRequest {
    /// Build the slot query, filling unspecified fields from `config`.
    pub fn to_query(&self, config: &SchedulerConfig) -> SlotQuery {
        let mut query = SlotQuery::from_config(self.date, self.duration_minutes, config);
        if self.step_minutes.is_some() {
            query.step_minutes = self.step_minutes;
        }
        if let Some(tz) = &self.timezone {
            query.timezone = Some(tz.clone());
        }
        query
    }
}

fn resolve_window(query: &SlotQuery) -> (Tz, WorkingWindow) {
    let tz = resolve_timezone(query.timezone.as_deref().unwrap_or("UTC"));
    let window = working_window(query.date, &tz, query.work_start_hour, query.work_end_hour);
    (tz, window)
}

/// Normalize every participant's raw entries into one unordered list.
pub fn normalize_participants(busy: &[ParticipantBusy]) -> Vec<BusyInterval> {
    busy.iter()
        .flat_map(|p| {
            let normalized = normalize_entries(&p.entries);
            if normalized.skipped > 0 {
                tracing::debug!(
                    participant = %p.participant,
                    skipped = normalized.skipped,
                    "Dropped malformed busy entries"
                );
            }
            normalized.intervals
        })
        .collect()
}

/// Compute candidate slots common to every participant.
///
/// Returns an empty list when nobody has a long enough gap in common.
///
/// # Errors
/// Returns `SlotError::InvalidDuration` for a non-positive duration and
/// `SlotError::InvalidWorkingHours` unless `0 <= start < end <= 23`.
pub fn compute_slots(busy: &[ParticipantBusy], query: &SlotQuery) -> Result<Vec<CandidateSlot>> {
    query.validate()?;

    let (tz, window) = resolve_window(query);

    let all = normalize_participants(busy);
    let merged = merge_busy_intervals(&all, &window, query.merge_margin_minutes);
    let free = free_windows(&window, &merged);
    let slots = generate_slots(&free, query.duration_minutes, query.step_minutes, &tz);

    tracing::debug!(
        participants = busy.len(),
        busy = all.len(),
        merged = merged.len(),
        free = free.len(),
        slots = slots.len(),
        timezone = %tz,
        "Computed candidate slots"
    );

    Ok(slots)
}

/// Fetch busy data for every participant in the request.
///
/// Fetches run one after another; the first failure aborts the whole request.
pub fn fetch_all<S: BusySource>(
    source: &S,
    participants: &[String],
    date: NaiveDate,
    timezone: &str,
) -> Result<Vec<ParticipantBusy>> {
    let tz = resolve_timezone(timezone);
    let day = day_window(date, &tz);

    participants
        .iter()
        .map(|participant| {
            source
                .fetch_busy(participant, &day)
                .map(|entries| ParticipantBusy::new(participant.clone(), entries))
                .map_err(|source| SlotError::Fetch {
                    participant: participant.clone(),
                    source,
                })
        })
        .collect()
}

/// Fetch every participant's busy data and compute their common slots.
///
/// # Errors
/// Any participant's fetch failure is returned as `SlotError::Fetch`; an empty
/// result is `SlotError::NoSlotsAvailable`.
pub fn find_common_slots<S: BusySource>(
    source: &S,
    request: &MeetingRequest,
    config: &SchedulerConfig,
) -> Result<Vec<CandidateSlot>> {
    let query = request.to_query(config);
    let timezone = query.timezone.as_deref().unwrap_or("UTC");
    let busy = fetch_all(source, &request.participants, request.date, timezone)?;

    let slots = compute_slots(&busy, &query)?;
    if slots.is_empty() {
        return Err(SlotError::NoSlotsAvailable);
    }
    Ok(slots)
}
