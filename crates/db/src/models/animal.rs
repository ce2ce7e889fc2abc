//! Animal entity model and DTOs.

use serde::{Deserialize, Serialize};
use shelter_core::animal::{is_valid_sex, AnimalStatus, StatusId};
use shelter_core::types::{Date, DbId, Timestamp};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use super::nullable;

/// An animal row joined with its species, breed and status names.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Animal {
    pub id: DbId,
    pub name: String,
    pub species_id: DbId,
    pub species_name: String,
    pub breed_id: Option<DbId>,
    pub breed_name: Option<String>,
    pub status_id: StatusId,
    /// Lookup name of `status_id` (`in_shelter`, `adopted`, `died`).
    pub status: String,
    pub sex: String,
    /// Age in whole years, when known.
    pub age: Option<i32>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub admission_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for admitting a new animal. Status always starts as in-shelter.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateAnimal {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub species_id: DbId,
    pub breed_id: Option<DbId>,
    /// Defaults to `unknown` if omitted.
    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,
    #[validate(range(min = 0, max = 100))]
    pub age: Option<i32>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub admission_date: Date,
}

/// DTO for updating an animal. All fields are optional; status changes go
/// through the dedicated status endpoint. `breed_id`, `age`, `description`
/// and `image_url` may be sent as `null` to clear them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateAnimal {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub species_id: Option<DbId>,
    #[serde(default, deserialize_with = "nullable")]
    pub breed_id: Option<Option<DbId>>,
    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(range(min = 0, max = 100))]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(length(max = 2000))]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable")]
    #[validate(url)]
    pub image_url: Option<Option<String>>,
    pub admission_date: Option<Date>,
}

/// Request body for a manual status change.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAnimalStatus {
    pub status: AnimalStatus,
}

/// Filters for the paginated animal listing.
#[derive(Debug, Clone, Default)]
pub struct AnimalFilter {
    pub status_id: Option<StatusId>,
    pub species_id: Option<DbId>,
    /// Already-escaped `ILIKE` pattern for the name.
    pub name_pattern: Option<String>,
}

fn validate_sex(sex: &str) -> Result<(), ValidationError> {
    if is_valid_sex(sex) {
        Ok(())
    } else {
        Err(ValidationError::new("sex")
            .with_message("sex must be one of: male, female, unknown".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_animal() -> CreateAnimal {
        CreateAnimal {
            name: "Bella".into(),
            species_id: 1,
            breed_id: None,
            sex: Some("female".into()),
            age: Some(3),
            description: None,
            image_url: Some("https://images.example.org/bella.jpg".into()),
            admission_date: Date::from_ymd_opt(2024, 1, 2).unwrap(),
        }
    }

    #[test]
    fn valid_animal_passes() {
        assert!(valid_animal().validate().is_ok());
    }

    #[test]
    fn unknown_sex_rejected() {
        let mut input = valid_animal();
        input.sex = Some("m".into());
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("sex"));
    }

    #[test]
    fn empty_name_and_bad_age_rejected() {
        let mut input = valid_animal();
        input.name = String::new();
        input.age = Some(-1);
        let errors = input.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("age"));
    }

    #[test]
    fn image_url_must_be_url() {
        let input = UpdateAnimal {
            image_url: Some(Some("not a url".into())),
            ..Default::default()
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let input: UpdateAnimal =
            serde_json::from_str(r#"{"breed_id": null, "age": 4}"#).unwrap();
        assert_eq!(input.breed_id, Some(None));
        assert_eq!(input.age, Some(Some(4)));
        assert_eq!(input.description, None);
        assert_eq!(input.image_url, None);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn cleared_fields_skip_validation() {
        let input: UpdateAnimal =
            serde_json::from_str(r#"{"image_url": null, "description": null}"#).unwrap();
        assert_eq!(input.image_url, Some(None));
        assert!(input.validate().is_ok());
    }
}
