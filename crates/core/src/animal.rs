//! Animal lifecycle rules.
//!
//! Status values map to the SMALLINT ids seeded into `animal_statuses`
//! (1-based, in declaration order).

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

/// Status ID type matching SMALLINT/SMALLSERIAL in the database.
pub type StatusId = i16;

pub const SEX_MALE: &str = "male";
pub const SEX_FEMALE: &str = "female";
pub const SEX_UNKNOWN: &str = "unknown";

/// Accepted values for the `sex` column.
pub const VALID_SEXES: &[&str] = &[SEX_MALE, SEX_FEMALE, SEX_UNKNOWN];

/// Upper bound for the optional age (whole years).
pub const MAX_AGE_YEARS: i32 = 100;

/// Where an animal currently is in its shelter lifecycle.
#[repr(i16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimalStatus {
    InShelter = 1,
    Adopted = 2,
    Died = 3,
}

impl AnimalStatus {
    /// Return the database status ID.
    pub fn id(self) -> StatusId {
        self as StatusId
    }

    /// Resolve a database status ID. Unknown ids yield `None`.
    pub fn from_id(id: StatusId) -> Option<Self> {
        match id {
            1 => Some(Self::InShelter),
            2 => Some(Self::Adopted),
            3 => Some(Self::Died),
            _ => None,
        }
    }

    /// Resolve a lookup-table name (`in_shelter`, `adopted`, `died`).
    pub fn from_name(name: &str) -> Option<Self> {
        [Self::InShelter, Self::Adopted, Self::Died]
            .into_iter()
            .find(|s| s.as_str() == name)
    }

    /// The wire/lookup-table name of this status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InShelter => "in_shelter",
            Self::Adopted => "adopted",
            Self::Died => "died",
        }
    }
}

impl From<AnimalStatus> for StatusId {
    fn from(value: AnimalStatus) -> Self {
        value as StatusId
    }
}

/// Check a manual status change requested through the status endpoint.
///
/// - Setting the current status again is a no-op and allowed.
/// - `Died` is terminal.
/// - `Adopted` can only be reached by recording an adoption.
pub fn check_status_transition(from: AnimalStatus, to: AnimalStatus) -> Result<(), CoreError> {
    if from == to {
        return Ok(());
    }
    if from == AnimalStatus::Died {
        return Err(CoreError::Conflict(
            "Animal is recorded as died; its status can no longer change".into(),
        ));
    }
    if to == AnimalStatus::Adopted {
        return Err(CoreError::Validation(
            "Animals become adopted by recording an adoption".into(),
        ));
    }
    Ok(())
}

/// Whether `sex` is one of [`VALID_SEXES`].
pub fn is_valid_sex(sex: &str) -> bool {
    VALID_SEXES.contains(&sex)
}

/// An admission date may not lie in the future.
pub fn validate_admission_date(admission_date: Date, today: Date) -> Result<(), CoreError> {
    if admission_date > today {
        return Err(CoreError::Validation(format!(
            "Admission date {admission_date} is in the future"
        )));
    }
    Ok(())
}
