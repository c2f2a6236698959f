//! Error types for slot-engine operations.

use thiserror::Error;

/// Boxed error returned by external collaborators (busy sources, calendar writers).
pub type CollaboratorError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error("Invalid working hours: start {start}, end {end} (need 0 <= start < end <= 23)")]
    InvalidWorkingHours { start: u32, end: u32 },

    #[error("Failed to fetch busy data for {participant}: {source}")]
    Fetch {
        participant: String,
        #[source]
        source: CollaboratorError,
    },

    #[error("No available time slots")]
    NoSlotsAvailable,

    #[error("Selected time slot is not available: {0}")]
    SlotUnavailable(String),

    #[error("Calendar booking failed: {0}")]
    Booking(#[source] CollaboratorError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
