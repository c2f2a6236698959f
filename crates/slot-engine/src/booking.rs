//! Book a chosen slot as a calendar event.
//!
//! Booking re-reads every participant's busy data and refuses slots that have
//! become busy since they were offered. Nothing is locked between that check
//! and the event insert.

use serde::{Deserialize, Serialize};

use crate::conflict::slot_conflicts;
use crate::error::{CollaboratorError, Result, SlotError};
use crate::scheduler::{fetch_all, normalize_participants};
use crate::source::BusySource;
use crate::types::CandidateSlot;

/// Fixed notice appended to every event description.
pub const SCHEDULED_NOTICE: &str =
    "This meeting was automatically scheduled by Meeting Management System.";

const EMAIL_REMINDER_MINUTES: i64 = 24 * 60;
const POPUP_REMINDER_MINUTES: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeetingKind {
    #[default]
    InPerson,
    /// Online meetings ask the calendar provider for a conference link.
    Online,
}

/// User-facing details of the meeting being booked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDetails {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub kind: MeetingKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventTime {
    pub date_time: String,
    pub time_zone: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reminder {
    pub method: String,
    pub minutes: i64,
}

/// Event payload handed to the calendar writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventRequest {
    pub summary: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start: EventTime,
    pub end: EventTime,
    pub attendees: Vec<String>,
    pub reminders: Vec<Reminder>,
    pub conference: bool,
}

/// What the calendar provider returns for an inserted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedEvent {
    pub id: String,
    #[serde(default)]
    pub html_link: Option<String>,
}

/// A slot successfully booked as a calendar event.
#[derive(Debug, Clone, PartialEq)]
pub struct Booking {
    pub slot: CandidateSlot,
    pub event: CreatedEvent,
}

/// Creates events in the external calendar on the organizer's behalf.
pub trait CalendarWriter {
    fn insert_event(
        &self,
        event: &EventRequest,
    ) -> std::result::Result<CreatedEvent, CollaboratorError>;
}

impl<W: CalendarWriter + ?Sized> CalendarWriter for &W {
    fn insert_event(
        &self,
        event: &EventRequest,
    ) -> std::result::Result<CreatedEvent, CollaboratorError> {
        (**self).insert_event(event)
    }
}

fn describe(details: &EventDetails) -> String {
    let mut description = details.description.clone().unwrap_or_default();
    if !description.is_empty() {
        description.push_str("\n\n");
    }
    description.push_str(SCHEDULED_NOTICE);
    if let Some(room) = &details.room {
        description.push_str(&format!("\nMeeting Room: {}", room));
    }
    description
}

/// Build the event payload for a slot.
pub fn build_event_request(
    slot: &CandidateSlot,
    participants: &[String],
    details: &EventDetails,
) -> EventRequest {
    let time_zone = slot.timezone().name().to_string();
    EventRequest {
        summary: details.title.clone(),
        description: describe(details),
        location: details.room.clone(),
        start: EventTime {
            date_time: slot.start.to_rfc3339(),
            time_zone: time_zone.clone(),
        },
        end: EventTime {
            date_time: slot.end.to_rfc3339(),
            time_zone,
        },
        attendees: participants.to_vec(),
        reminders: vec![
            Reminder {
                method: "email".to_string(),
                minutes: EMAIL_REMINDER_MINUTES,
            },
            Reminder {
                method: "popup".to_string(),
                minutes: POPUP_REMINDER_MINUTES,
            },
        ],
        conference: details.kind == MeetingKind::Online,
    }
}

/// Pick the slot at `index` from a previously computed list.
pub fn select_slot(slots: &[CandidateSlot], index: usize) -> Result<&CandidateSlot> {
    slots.get(index).ok_or_else(|| {
        SlotError::SlotUnavailable(format!(
            "index {} out of range ({} slots offered)",
            index,
            slots.len()
        ))
    })
}

/// Re-check a slot against fresh busy data and book it.
///
/// # Errors
/// `SlotError::Fetch` if any participant's busy data cannot be read,
/// `SlotError::SlotUnavailable` if the slot now overlaps a busy interval,
/// `SlotError::Booking` if the calendar writer rejects the event.
pub fn book_slot<S: BusySource, W: CalendarWriter>(
    source: &S,
    writer: &W,
    participants: &[String],
    slot: &CandidateSlot,
    details: &EventDetails,
) -> Result<Booking> {
    let tz = slot.timezone();
    let date = slot.start.date_naive();
    let busy = fetch_all(source, participants, date, tz.name())?;
    let intervals = normalize_participants(&busy);

    let conflicts = slot_conflicts(slot, &intervals);
    if !conflicts.is_empty() {
        let overlap: i64 = conflicts.iter().map(|c| c.overlap_minutes).sum();
        return Err(SlotError::SlotUnavailable(format!(
            "{} conflicting busy interval(s), {} minutes of overlap",
            conflicts.len(),
            overlap
        )));
    }

    let request = build_event_request(slot, participants, details);
    let event = writer.insert_event(&request).map_err(SlotError::Booking)?;

    tracing::info!(
        event_id = %event.id,
        start = %slot.start.to_rfc3339(),
        attendees = participants.len(),
        "Booked meeting"
    );

    Ok(Booking {
        slot: slot.clone(),
        event,
    })
}
