//! `meetslot` CLI: compute common meeting slots from free/busy JSON.
//!
//! ## Usage
//!
//! ```sh
//! # Slots for everyone in busy.json (stdin → stdout)
//! cat busy.json | meetslot slots --date 2026-03-16 --duration 60
//!
//! # Half-hour meetings every 15 minutes, Tehran working hours
//! meetslot slots -i busy.json --date 2026-03-16 --duration 30 --step 15 --tz Asia/Tehran
//!
//! # Only some participants, defaults from a config file
//! meetslot slots -i busy.json --date 2026-03-16 --duration 45 \
//!   --participants a@example.com,b@example.com --config scheduler.json
//!
//! # Show the working window as UTC instants
//! meetslot window --date 2026-03-16 --tz America/New_York
//!
//! # Show how busy entries are parsed
//! meetslot normalize -i busy.json
//! ```
//!
//! `busy.json` maps each participant to an array of `{"start", "end"}` entries.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;

use slot_engine::config::validate_working_hours;
use slot_engine::normalize::{entries_from_json, normalize_entries, RawBusyEntry};
use slot_engine::{
    find_common_slots, resolve_timezone, working_window, CandidateSlot, InMemoryBusySource,
    MeetingRequest, SchedulerConfig, SlotError,
};

#[derive(Parser)]
#[command(
    name = "meetslot",
    version,
    about = "Find meeting slots every participant is free for"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log pipeline details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute common candidate slots
    Slots {
        /// Busy JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Meeting date (YYYY-MM-DD) in the meeting timezone
        #[arg(long)]
        date: NaiveDate,
        /// Meeting length in minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
        /// Minutes between consecutive slot starts (defaults to the duration)
        #[arg(long)]
        step: Option<i64>,
        /// IANA timezone of the working day
        #[arg(long)]
        tz: Option<String>,
        /// First working hour
        #[arg(long)]
        start_hour: Option<u32>,
        /// End of the working day (hour, exclusive)
        #[arg(long)]
        end_hour: Option<u32>,
        /// Merge busy periods separated by at most this many minutes
        #[arg(long, allow_negative_numbers = true)]
        margin: Option<i64>,
        /// Comma-separated participants (defaults to everyone in the input)
        #[arg(long)]
        participants: Option<String>,
        /// JSON scheduler config file
        #[arg(long)]
        config: Option<String>,
    },
    /// Show the working window for a date and timezone
    Window {
        #[arg(long)]
        date: NaiveDate,
        #[arg(long)]
        tz: Option<String>,
        #[arg(long, default_value_t = slot_engine::config::DEFAULT_WORK_START_HOUR)]
        start_hour: u32,
        #[arg(long, default_value_t = slot_engine::config::DEFAULT_WORK_END_HOUR)]
        end_hour: u32,
    },
    /// Parse busy entries and report what was kept and skipped
    Normalize {
        /// Busy JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

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
    start_utc: String,
    end_utc: String,
    start_local: String,
    end_local: String,
}

#[derive(Serialize)]
struct IntervalDto {
    start: String,
    end: String,
}

#[derive(Serialize)]
struct NormalizedDto {
    participant: String,
    intervals: Vec<IntervalDto>,
    skipped: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Slots {
            input,
            output,
            date,
            duration,
            step,
            tz,
            start_hour,
            end_hour,
            margin,
            participants,
            config,
        } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(h) = start_hour {
                config.work_start_hour = h;
            }
            if let Some(h) = end_hour {
                config.work_end_hour = h;
            }
            if let Some(m) = margin {
                config.merge_margin_minutes = m;
            }
            config.validate().context("Invalid scheduler settings")?;

            let busy = read_busy(input.as_deref())?;
            let participants = match participants.as_deref() {
                Some(raw) => split_list(raw),
                None => busy.iter().map(|(p, _)| p.clone()).collect(),
            };

            let mut source = InMemoryBusySource::new();
            for (participant, entries) in busy {
                source.insert(participant, entries);
            }

            let request = MeetingRequest {
                participants,
                date,
                duration_minutes: duration,
                step_minutes: step,
                timezone: tz,
            };

            let slots = match find_common_slots(&source, &request, &config) {
                Ok(slots) => slots,
                Err(SlotError::NoSlotsAvailable) => {
                    anyhow::bail!("No available time slots on {} for {} minutes", date, duration)
                }
                Err(e) => return Err(e).context("Failed to compute slots"),
            };

            tracing::debug!(count = slots.len(), "Writing slots");
            let dtos: Vec<SlotDto> = slots.iter().map(SlotDto::from).collect();
            let json = serde_json::to_string_pretty(&dtos)?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Window {
            date,
            tz,
            start_hour,
            end_hour,
        } => {
            validate_working_hours(start_hour, end_hour)?;
            let tz = resolve_timezone(tz.as_deref().unwrap_or("UTC"));
            let window = working_window(date, &tz, start_hour, end_hour);
            let dto = WindowDto {
                timezone: tz.name().to_string(),
                start_utc: window.start.to_rfc3339(),
                end_utc: window.end.to_rfc3339(),
                start_local: window.start.with_timezone(&tz).to_rfc3339(),
                end_local: window.end.with_timezone(&tz).to_rfc3339(),
            };
            println!("{}", serde_json::to_string_pretty(&dto)?);
        }
        Commands::Normalize { input } => {
            let busy = read_busy(input.as_deref())?;
            let report: Vec<NormalizedDto> = busy
                .iter()
                .map(|(participant, entries)| {
                    let mut normalized = normalize_entries(entries);
                    normalized.intervals.sort_by_key(|i| (i.start, i.end));
                    NormalizedDto {
                        participant: participant.clone(),
                        intervals: normalized
                            .intervals
                            .iter()
                            .map(|i| IntervalDto {
                                start: i.start.to_rfc3339(),
                                end: i.end.to_rfc3339(),
                            })
                            .collect(),
                        skipped: normalized.skipped,
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}

/// Install a stderr subscriber. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&str>) -> Result<SchedulerConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            SchedulerConfig::from_json_str(&raw)
                .with_context(|| format!("Invalid config: {}", path))
        }
        None => Ok(SchedulerConfig::default()),
    }
}

/// Read the participant → busy entries document, keeping document order.
fn read_busy(path: Option<&str>) -> Result<Vec<(String, Vec<RawBusyEntry>)>> {
    let raw = read_input(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).context("Busy input is not valid JSON")?;
    let map = value
        .as_object()
        .context("Busy input must be a JSON object mapping participants to busy entries")?;

    map.iter()
        .map(|(participant, entries)| {
            let entries = entries_from_json(entries).with_context(|| {
                format!("Busy entries for '{}' must be a JSON array", participant)
            })?;
            Ok((participant.clone(), entries))
        })
        .collect()
}

/// `"a, b,,c"` → `["a", "b", "c"]`
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
