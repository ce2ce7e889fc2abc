//! Species entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A species row from the `species` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Species {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a species.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSpecies {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// DTO for updating a species. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSpecies {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
