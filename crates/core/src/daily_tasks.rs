//! Daily task planning and scheduling.
//!
//! A generation pass turns the animal roster into new daily task aggregates:
//! every animal without a task for the pass date gets one, seeded with a copy
//! of each of its default entries. Both functions here are pure; loading the
//! roster and committing the plan happen in the persistence layer.

use std::time::Duration;

use chrono::NaiveTime;

use crate::types::{Date, DbId, Timestamp};

/// Interval between two scheduled passes.
pub const PASS_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// Title and description of a checklist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryTemplate {
    pub title: String,
    pub description: Option<String>,
}

/// One animal as seen by a generation pass.
#[derive(Debug, Clone)]
pub struct RosterAnimal {
    pub animal_id: DbId,
    /// Dates for which the animal already has a daily task.
    pub task_dates: Vec<Date>,
    /// The animal's default entries, in display order.
    pub default_entries: Vec<EntryTemplate>,
}

/// A daily task to be inserted, together with its entries.
///
/// Entries always start incomplete: no completion time and no completing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedDailyTask {
    pub animal_id: DbId,
    pub task_date: Date,
    pub entries: Vec<EntryTemplate>,
}

/// Plan the daily tasks missing for `date`.
///
/// Animals that already have a task for `date` are skipped entirely. Animals
/// without default entries still receive a task, with no entries.
pub fn plan_daily_tasks(date: Date, roster: &[RosterAnimal]) -> Vec<PlannedDailyTask> {
    roster
        .iter()
        .filter(|animal| !animal.task_dates.contains(&date))
        .map(|animal| PlannedDailyTask {
            animal_id: animal.animal_id,
            task_date: date,
            entries: animal.default_entries.clone(),
        })
        .collect()
}

/// Time from `now` until the next `run_at` boundary (UTC time of day).
///
/// When `now` sits exactly on the boundary the delay is zero.
pub fn next_run_delay(now: Timestamp, run_at: NaiveTime) -> Duration {
    let today_run = now.date_naive().and_time(run_at).and_utc();
    let next = if today_run >= now {
        today_run
    } else {
        today_run + chrono::Duration::days(1)
    };
    (next - now).to_std().unwrap_or(Duration::ZERO)
}

/// Parse an `HH:MM` time of day.
pub fn parse_run_at(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").ok()
}
