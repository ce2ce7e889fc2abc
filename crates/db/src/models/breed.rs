//! Breed entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A breed row from the `breeds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Breed {
    pub id: DbId,
    pub species_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a breed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBreed {
    pub species_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

/// DTO for updating a breed. Moving a breed to another species is allowed
/// only while no animal references it.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateBreed {
    pub species_id: Option<DbId>,
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}
