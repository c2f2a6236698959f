//! Scheduler configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config. The
//! config is passed explicitly to each operation; nothing is read from the
//! process environment.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};

pub const DEFAULT_WORK_START_HOUR: u32 = 8;
pub const DEFAULT_WORK_END_HOUR: u32 = 21;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// IANA timezone used when a request names none.
    pub default_timezone: String,
    /// First hour of the working day (inclusive).
    pub work_start_hour: u32,
    /// Last hour of the working day (exclusive).
    pub work_end_hour: u32,
    /// Busy intervals separated by at most this many minutes are merged.
    pub merge_margin_minutes: i64,
    /// Step used when a request names none. `None` means back-to-back slots.
    pub default_step_minutes: Option<i64>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            default_timezone: "UTC".to_string(),
            work_start_hour: DEFAULT_WORK_START_HOUR,
            work_end_hour: DEFAULT_WORK_END_HOUR,
            merge_margin_minutes: 0,
            default_step_minutes: None,
        }
    }
}

impl SchedulerConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SlotError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_working_hours(self.work_start_hour, self.work_end_hour)
            .map_err(|e| SlotError::Config(e.to_string()))?;
        if self.merge_margin_minutes < 0 {
            return Err(SlotError::Config(format!(
                "merge_margin_minutes must not be negative, got {}",
                self.merge_margin_minutes
            )));
        }
        if self.default_timezone.parse::<Tz>().is_err() {
            return Err(SlotError::Config(format!(
                "unknown default_timezone '{}'",
                self.default_timezone
            )));
        }
        Ok(())
    }
}

/// Check `0 <= start < end <= 23`.
pub fn validate_working_hours(start: u32, end: u32) -> Result<()> {
    if start < end && end <= 23 {
        Ok(())
    } else {
        Err(SlotError::InvalidWorkingHours { start, end })
    }
}
