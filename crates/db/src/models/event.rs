//! Event entity model and DTOs.
//!
//! Events are dated shelter happenings (vet visits, vaccinations, open days),
//! optionally tied to one animal.

use serde::{Deserialize, Serialize};
use shelter_core::types::{DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `events` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Event {
    pub id: DbId,
    pub animal_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub event_date: Timestamp,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an event. `created_by` is taken from the caller.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEvent {
    pub animal_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub event_date: Timestamp,
}

/// DTO for updating an event. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateEvent {
    pub animal_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    pub event_date: Option<Timestamp>,
}

/// Filters for the paginated event listing.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    pub animal_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
