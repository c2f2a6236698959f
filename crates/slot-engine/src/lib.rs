//! # slot-engine
//!
//! Common meeting slot computation from calendar free/busy data.
//!
//! Given every participant's busy periods for a day, the engine finds the
//! fixed-length slots inside the working hours of a named timezone that are
//! free for everyone, then books a chosen slot through an external calendar.
//!
//! ## Pipeline
//!
//! raw busy entries → [`normalize`] → [`merge`] (clipped to the working
//! window from [`window`]) → [`freebusy`] → [`slots`]
//!
//! ## Modules
//!
//! - [`normalize`]: Parse heterogeneous datetime strings into busy intervals
//! - [`window`]: Working-day boundaries in a named timezone, as UTC instants
//! - [`merge`]: Clip and merge busy intervals from all participants
//! - [`freebusy`]: Free windows left inside the working window
//! - [`slots`]: Fixed-duration, fixed-step candidate slots
//! - [`scheduler`]: End-to-end computation and per-participant fetching
//! - [`source`]: The busy-data source trait and an in-memory implementation
//! - [`conflict`]: Overlap detection between a slot and busy intervals
//! - [`booking`]: Re-check and book a chosen slot as a calendar event
//! - [`config`]: Scheduler defaults
//! - [`error`]: Error types

pub mod booking;
pub mod config;
pub mod conflict;
pub mod error;
pub mod freebusy;
pub mod merge;
pub mod normalize;
pub mod scheduler;
pub mod slots;
pub mod source;
pub mod types;
pub mod window;

pub use booking::{book_slot, select_slot, Booking, CalendarWriter, EventDetails, MeetingKind};
pub use config::SchedulerConfig;
pub use error::SlotError;
pub use normalize::{normalize_busy, RawBusyEntry};
pub use scheduler::{compute_slots, find_common_slots, MeetingRequest, ParticipantBusy, SlotQuery};
pub use source::{BusySource, InMemoryBusySource};
pub use types::{BusyInterval, CandidateSlot, DayWindow, FreeWindow, WorkingWindow};
pub use window::{resolve_timezone, working_window};
