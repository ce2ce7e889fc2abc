//! Daily task and daily task entry models.

use serde::{Deserialize, Serialize};
use shelter_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;

/// A row from the `daily_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyTask {
    pub id: DbId,
    pub animal_id: DbId,
    pub task_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `daily_task_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DailyTaskEntry {
    pub id: DbId,
    pub daily_task_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub is_completed: bool,
    pub completed_at: Option<Timestamp>,
    pub completed_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A daily task together with its checklist entries.
#[derive(Debug, Clone, Serialize)]
pub struct DailyTaskWithEntries {
    #[serde(flatten)]
    pub task: DailyTask,
    pub entries: Vec<DailyTaskEntry>,
}

/// Request body for toggling an entry's completion.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateEntryCompletion {
    pub is_completed: bool,
}
