//! Benchmark: full slot computation for a busy team day.

use std::hint::black_box;

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use criterion::{criterion_group, criterion_main, Criterion};
use slot_engine::{compute_slots, ParticipantBusy, RawBusyEntry, SlotQuery};

/// Twenty participants, each with a dozen staggered meetings.
fn team_day() -> Vec<ParticipantBusy> {
    let base = Utc.with_ymd_and_hms(2026, 3, 16, 4, 0, 0).unwrap();
    (0..20)
        .map(|p| {
            let entries = (0..12)
                .map(|i| {
                    let start = base + Duration::minutes(p * 7 + i * 75);
                    let end = start + Duration::minutes(25 + (p + i) % 4 * 10);
                    RawBusyEntry::new(start.to_rfc3339(), end.to_rfc3339())
                })
                .collect();
            ParticipantBusy::new(format!("user{}@example.com", p), entries)
        })
        .collect()
}

fn bench_compute_slots(c: &mut Criterion) {
    let busy = team_day();
    let query = SlotQuery::new(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap(), 15)
        .step(5)
        .timezone("Asia/Tehran");

    c.bench_function("compute_slots/20x12", |b| {
        b.iter(|| compute_slots(black_box(&busy), black_box(&query)))
    });
}

criterion_group!(benches, bench_compute_slots);
criterion_main!(benches);
