//! Shelter configuration (singleton) model.

use serde::{Deserialize, Serialize};
use shelter_core::types::Timestamp;
use sqlx::FromRow;
use validator::Validate;

/// The single row of `shelter_configuration`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ShelterConfiguration {
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub updated_at: Timestamp,
}

/// DTO for updating shelter details. All fields are optional.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateShelterConfiguration {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(max = 300))]
    pub address: Option<String>,
    #[validate(length(max = 30))]
    pub phone: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
}
