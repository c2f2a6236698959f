//! WASM bindings for slot-engine.
//!
//! Exposes slot computation and working-window resolution to JavaScript via
//! `wasm-bindgen`. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/slot-engine-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::config::{validate_working_hours, DEFAULT_WORK_END_HOUR, DEFAULT_WORK_START_HOUR};
use slot_engine::normalize::entries_from_json;
use slot_engine::{CandidateSlot, ParticipantBusy, SlotQuery};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SlotDto {
    start: String,
    end: String,
    duration_minutes: i64,
}

impl From<&CandidateSlot> for SlotDto {
    fn from(slot: &CandidateSlot) -> Self {
        Self {
            start: slot.start.to_rfc3339(),
            end: slot.end.to_rfc3339(),
            duration_minutes: slot.duration_minutes(),
        }
    }
}

#[derive(Serialize)]
struct WindowDto {
    timezone: String,
    start: String,
    end: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", s, e))
}

/// Convert `{"participant": [{start, end}, ...], ...}` into participant streams.
fn parse_busy_json(json: &str) -> Result<Vec<ParticipantBusy>, String> {
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| format!("Invalid busy JSON: {}", e))?;
    let map = value
        .as_object()
        .ok_or_else(|| "Busy JSON must be an object keyed by participant".to_string())?;

    map.iter()
        .map(|(participant, entries)| {
            entries_from_json(entries)
                .map(|entries| ParticipantBusy::new(participant.clone(), entries))
                .ok_or_else(|| format!("Busy entries for '{}' must be an array", participant))
        })
        .collect()
}

fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn compute_slots_json(
    busy_json: &str,
    date: &str,
    duration_minutes: i32,
    step_minutes: Option<i32>,
    timezone: Option<String>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
) -> Result<String, String> {
    let busy = parse_busy_json(busy_json)?;
    let mut query = SlotQuery::new(parse_date(date)?, i64::from(duration_minutes)).working_hours(
        start_hour.unwrap_or(DEFAULT_WORK_START_HOUR),
        end_hour.unwrap_or(DEFAULT_WORK_END_HOUR),
    );
    query.step_minutes = step_minutes.map(i64::from);
    query.timezone = timezone;

    let slots = slot_engine::compute_slots(&busy, &query).map_err(|e| e.to_string())?;
    let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
    to_json(&dtos)
}

fn working_window_json(
    date: &str,
    timezone: Option<String>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
) -> Result<String, String> {
    let start_hour = start_hour.unwrap_or(DEFAULT_WORK_START_HOUR);
    let end_hour = end_hour.unwrap_or(DEFAULT_WORK_END_HOUR);
    validate_working_hours(start_hour, end_hour).map_err(|e| e.to_string())?;

    let tz = slot_engine::resolve_timezone(timezone.as_deref().unwrap_or("UTC"));
    let window = slot_engine::working_window(parse_date(date)?, &tz, start_hour, end_hour);
    to_json(&WindowDto {
        timezone: tz.name().to_string(),
        start: window.start.to_rfc3339(),
        end: window.end.to_rfc3339(),
    })
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute common candidate slots.
///
/// `busy_json` maps each participant to a JSON array of `{start, end}` busy
/// entries; malformed entries are skipped. Returns a JSON string containing an
/// array of `{start, end, duration_minutes}` objects localized to `timezone`.
///
/// # Arguments
/// - `date` -- Meeting date, "YYYY-MM-DD"
/// - `duration_minutes` -- Meeting length; must be positive
/// - `step_minutes` -- Optional offset between slot starts (defaults to the duration)
/// - `timezone` -- Optional IANA timezone (unknown names fall back to UTC)
/// - `start_hour`, `end_hour` -- Optional working hours (default 8-21)
#[wasm_bindgen(js_name = "computeSlots")]
pub fn compute_slots(
    busy_json: &str,
    date: &str,
    duration_minutes: i32,
    step_minutes: Option<i32>,
    timezone: Option<String>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
) -> Result<String, JsValue> {
    compute_slots_json(
        busy_json,
        date,
        duration_minutes,
        step_minutes,
        timezone,
        start_hour,
        end_hour,
    )
    .map_err(|e| JsValue::from_str(&e))
}

/// Resolve the working window of a date in a timezone.
///
/// Returns a JSON string `{timezone, start, end}` with UTC RFC 3339 instants.
#[wasm_bindgen(js_name = "workingWindow")]
pub fn working_window(
    date: &str,
    timezone: Option<String>,
    start_hour: Option<u32>,
    end_hour: Option<u32>,
) -> Result<String, JsValue> {
    working_window_json(date, timezone, start_hour, end_hour).map_err(|e| JsValue::from_str(&e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUSY: &str = r#"{
        "a@example.com": [{"start": "2026-03-16T08:00:00Z", "end": "2026-03-16T20:00:00Z"}],
        "b@example.com": [{"start": "oops", "end": "2026-03-16T21:00:00Z"}]
    }"#;

    #[test]
    fn computes_slots_as_json() {
        let json = compute_slots_json(BUSY, "2026-03-16", 30, None, None, None, None).unwrap();
        let slots: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(slots.as_array().unwrap().len(), 2);
        assert_eq!(slots[0]["start"], "2026-03-16T20:00:00+00:00");
        assert_eq!(slots[1]["duration_minutes"], 30);
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(compute_slots_json("[]", "2026-03-16", 30, None, None, None, None).is_err());
        assert!(compute_slots_json(BUSY, "16/03/2026", 30, None, None, None, None).is_err());
        let err = compute_slots_json(BUSY, "2026-03-16", 0, None, None, None, None).unwrap_err();
        assert!(err.contains("Invalid duration"));
    }

    #[test]
    fn resolves_window_in_timezone() {
        let json = working_window_json("2026-03-16", Some("Asia/Tehran".to_string()), None, None)
            .unwrap();
        let window: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(window["timezone"], "Asia/Tehran");
        assert_eq!(window["start"], "2026-03-16T04:30:00+00:00");
        assert_eq!(window["end"], "2026-03-16T17:30:00+00:00");
    }

    #[test]
    fn window_rejects_inverted_hours() {
        assert!(working_window_json("2026-03-16", None, Some(20), Some(8)).is_err());
    }
}
