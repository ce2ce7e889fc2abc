//! Nightly daily task generation.
//!
//! Once a day, at the configured UTC time, every animal without a daily task
//! for the current date gets one, seeded from its default entries. The first
//! pass is aligned to the next `run_at` boundary after start-up; later passes
//! follow every [`PASS_PERIOD`]. Passes never overlap and a failed pass is
//! logged and skipped until the next tick.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use serde::Serialize;
use shelter_core::clock::Clock;
use shelter_core::daily_tasks::{
    next_run_delay, plan_daily_tasks, PlannedDailyTask, RosterAnimal, PASS_PERIOD,
};
use shelter_core::types::Date;
use shelter_db::repositories::DailyTaskRepo;
use sqlx::PgPool;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Persistence used by a generation pass.
#[async_trait]
pub trait DailyTaskStore: Send + Sync {
    /// Every animal with its task dates and default entries, as of `date`.
    async fn load_roster(&self, date: Date) -> Result<Vec<RosterAnimal>, sqlx::Error>;

    /// Persist planned tasks in one batch. Returns the number created.
    async fn insert_daily_tasks(&self, tasks: &[PlannedDailyTask]) -> Result<u64, sqlx::Error>;
}

/// [`DailyTaskStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgDailyTaskStore {
    pool: PgPool,
}

impl PgDailyTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DailyTaskStore for PgDailyTaskStore {
    async fn load_roster(&self, date: Date) -> Result<Vec<RosterAnimal>, sqlx::Error> {
        DailyTaskRepo::load_roster(&self.pool, date).await
    }

    async fn insert_daily_tasks(&self, tasks: &[PlannedDailyTask]) -> Result<u64, sqlx::Error> {
        DailyTaskRepo::insert_planned(&self.pool, tasks).await
    }
}

/// Outcome of one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PassSummary {
    pub date: Date,
    /// Animals on the roster.
    pub animals: usize,
    /// Daily tasks created by this pass.
    pub created: u64,
}

/// The recurring generation job.
pub struct DailyTaskJob<S> {
    store: S,
    clock: Arc<dyn Clock>,
    run_at: NaiveTime,
}

impl<S: DailyTaskStore> DailyTaskJob<S> {
    pub fn new(store: S, clock: Arc<dyn Clock>, run_at: NaiveTime) -> Self {
        Self {
            store,
            clock,
            run_at,
        }
    }

    /// Wait for the next `run_at` boundary, then run a pass every
    /// [`PASS_PERIOD`] until `cancel` fires.
    ///
    /// Cancellation is observed during both waits. A pass that has started
    /// always runs to completion.
    pub async fn run(&self, cancel: CancellationToken) {
        let delay = next_run_delay(self.clock.now(), self.run_at);
        tracing::info!(
            run_at = %self.run_at,
            first_pass_in_secs = delay.as_secs(),
            "Daily task job started"
        );

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Daily task job stopping");
                return;
            }
            _ = tokio::time::sleep(delay) => {}
        }

        let mut interval = tokio::time::interval(PASS_PERIOD);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("Daily task job stopping");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_pass().await {
                        tracing::error!(error = %e, "Daily task pass failed");
                    }
                }
            }
        }
    }

    /// Run one pass for the clock's current date.
    pub async fn run_pass(&self) -> Result<PassSummary, sqlx::Error> {
        let date = self.clock.today();
        let roster = self.store.load_roster(date).await?;
        let planned = plan_daily_tasks(date, &roster);

        let created = if planned.is_empty() {
            0
        } else {
            self.store.insert_daily_tasks(&planned).await?
        };

        let summary = PassSummary {
            date,
            animals: roster.len(),
            created,
        };
        tracing::info!(
            date = %summary.date,
            animals = summary.animals,
            planned = planned.len(),
            created = summary.created,
            "Daily task pass completed"
        );
        Ok(summary)
    }
}
