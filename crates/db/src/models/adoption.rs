//! Adoption entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `adoptions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Adoption {
    pub id: DbId,
    pub animal_id: DbId,
    pub adopter_first_name: String,
    pub adopter_last_name: String,
    pub adopter_email: String,
    pub adopter_phone: Option<String>,
    pub adopter_address: Option<String>,
    pub adoption_date: Date,
    pub notes: Option<String>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording an adoption.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAdoption {
    pub animal_id: DbId,
    #[validate(length(min = 1, max = 100))]
    pub adopter_first_name: String,
    #[validate(length(min = 1, max = 100))]
    pub adopter_last_name: String,
    #[validate(email)]
    pub adopter_email: String,
    #[validate(length(max = 30))]
    pub adopter_phone: Option<String>,
    #[validate(length(max = 300))]
    pub adopter_address: Option<String>,
    pub adoption_date: Date,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}

/// DTO for correcting adoption details. The animal cannot be changed.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAdoption {
    #[validate(length(min = 1, max = 100))]
    pub adopter_first_name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub adopter_last_name: Option<String>,
    #[validate(email)]
    pub adopter_email: Option<String>,
    #[validate(length(max = 30))]
    pub adopter_phone: Option<String>,
    #[validate(length(max = 300))]
    pub adopter_address: Option<String>,
    pub adoption_date: Option<Date>,
    #[validate(length(max = 2000))]
    pub notes: Option<String>,
}
