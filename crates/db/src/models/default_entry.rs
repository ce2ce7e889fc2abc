//! Daily task default entry (per-animal checklist template) model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `daily_task_default_entries` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DefaultEntry {
    pub id: DbId,
    pub animal_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a default entry. The animal comes from the route.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateDefaultEntry {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// DTO for editing a default entry.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateDefaultEntry {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
