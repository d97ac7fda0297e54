// File: ./src/scheduler.rs
// Recurring mode: one check per day at the configured local time.
use crate::controller::Controller;
use anyhow::{Context, Result};
use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use tokio::sync::watch;
use tokio::time::sleep;

/// Parse a "HH:MM" wall-clock time.
pub fn parse_check_time(s: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .with_context(|| format!("Invalid check_time '{}', expected HH:MM", s))
}

/// Next local occurrence of `at`, strictly after `now`.
///
/// Rolls over to the following day when the time already passed today.
/// When a DST transition makes the wall-clock time nonexistent, the same
/// instant one hour later is used; ambiguous times resolve to the earlier
/// occurrence.
pub fn next_occurrence(now: DateTime<Local>, at: NaiveTime) -> DateTime<Local> {
    let mut date = now.date_naive();
    loop {
        if let Some(candidate) = resolve_local(date, at)
            && candidate > now
        {
            return candidate;
        }
        date += chrono::Duration::days(1);
    }
}

fn resolve_local(date: NaiveDate, at: NaiveTime) -> Option<DateTime<Local>> {
    use chrono::offset::LocalResult;
    match date.and_time(at).and_local_timezone(Local) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (date.and_time(at) + chrono::Duration::hours(1))
            .and_local_timezone(Local)
            .earliest(),
    }
}

/// Run one check per day at `at` until the shutdown signal fires.
///
/// A failed check is logged and the loop simply waits for the next day;
/// scheduled mode never exits over a bad fetch. Checks are awaited inline,
/// so two runs can never overlap.
pub async fn run_daily(
    controller: &Controller,
    at: NaiveTime,
    mut shutdown: watch::Receiver<bool>,
) {
    loop {
        let target = next_occurrence(Local::now(), at);
        log::info!("Next reminder check at {}", target.format("%Y-%m-%d %H:%M"));

        let wait = (target - Local::now())
            .to_std()
            .unwrap_or(std::time::Duration::ZERO);

        tokio::select! {
            _ = sleep(wait) => {
                if !controller.run_check().await {
                    log::warn!("Scheduled check failed; will try again tomorrow");
                }
            }
            changed = shutdown.changed() => {
                // A dropped sender can no longer cancel; keep scheduling.
                if changed.is_err() {
                    sleep(wait).await;
                    if !controller.run_check().await {
                        log::warn!("Scheduled check failed; will try again tomorrow");
                    }
                    continue;
                }
                if *shutdown.borrow() {
                    log::info!("Stopping scheduler.");
                    return;
                }
            }
        }
    }
}
