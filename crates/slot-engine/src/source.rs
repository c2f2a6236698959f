//! Busy-data sources: the seam to the external calendar provider.

use std::collections::HashMap;

use crate::error::CollaboratorError;
use crate::normalize::RawBusyEntry;
use crate::types::DayWindow;

/// Fetches one participant's raw busy entries for a day.
///
/// Implementations own credential handling; by the time `fetch_busy` is called
/// the source must already hold whatever access it needs, or fail.
pub trait BusySource {
    fn fetch_busy(
        &self,
        participant: &str,
        day: &DayWindow,
    ) -> Result<Vec<RawBusyEntry>, CollaboratorError>;
}

impl<S: BusySource + ?Sized> BusySource for &S {
    fn fetch_busy(
        &self,
        participant: &str,
        day: &DayWindow,
    ) -> Result<Vec<RawBusyEntry>, CollaboratorError> {
        (**self).fetch_busy(participant, day)
    }
}

/// Busy data held in memory, keyed by participant.
///
/// Entries are returned as stored, regardless of the requested day; the
/// pipeline clips them to the working window. Unknown participants fail.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBusySource {
    entries: HashMap<String, Vec<RawBusyEntry>>,
}

impl InMemoryBusySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, participant: impl Into<String>, entries: Vec<RawBusyEntry>) {
        self.entries.entry(participant.into()).or_default().extend(entries);
    }

    pub fn with(mut self, participant: impl Into<String>, entries: Vec<RawBusyEntry>) -> Self {
        self.insert(participant, entries);
        self
    }
}

impl BusySource for InMemoryBusySource {
    fn fetch_busy(
        &self,
        participant: &str,
        _day: &DayWindow,
    ) -> Result<Vec<RawBusyEntry>, CollaboratorError> {
        self.entries
            .get(participant)
            .cloned()
            .ok_or_else(|| format!("unknown participant '{}'", participant).into())
    }
}
