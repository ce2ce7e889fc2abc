//! Shared query parameter types for API handlers.

use serde::Deserialize;
use shelter_core::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use shelter_core::types::{Date, DbId, Timestamp};

/// Generic pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Clamped `(limit, offset)` pair.
    pub fn resolve(&self) -> (i64, i64) {
        (
            clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
            clamp_offset(self.offset),
        )
    }
}

/// `GET /animals` filters.
#[derive(Debug, Default, Deserialize)]
pub struct AnimalListParams {
    /// `in_shelter`, `adopted` or `died`.
    pub status: Option<String>,
    pub species_id: Option<DbId>,
    /// Case-insensitive name substring.
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /breeds` filter.
#[derive(Debug, Default, Deserialize)]
pub struct BreedListParams {
    pub species_id: Option<DbId>,
}

/// `GET /events` filters.
#[derive(Debug, Default, Deserialize)]
pub struct EventListParams {
    pub animal_id: Option<DbId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// `GET /adoptions` filter.
#[derive(Debug, Default, Deserialize)]
pub struct AdoptionListParams {
    pub animal_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Inclusive date window for daily task history.
#[derive(Debug, Default, Deserialize)]
pub struct DateRangeParams {
    pub from: Option<Date>,
    pub to: Option<Date>,
}
