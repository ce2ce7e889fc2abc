//! Adoption rules.

use crate::animal::AnimalStatus;
use crate::error::CoreError;
use crate::types::Date;

/// Only animals currently in the shelter can be adopted.
pub fn ensure_adoptable(status: AnimalStatus) -> Result<(), CoreError> {
    match status {
        AnimalStatus::InShelter => Ok(()),
        AnimalStatus::Adopted => Err(CoreError::Conflict("Animal is already adopted".into())),
        AnimalStatus::Died => Err(CoreError::Conflict(
            "Animal is recorded as died and cannot be adopted".into(),
        )),
    }
}

/// An adoption date must fall between the animal's admission and today.
pub fn validate_adoption_date(
    adoption_date: Date,
    admission_date: Date,
    today: Date,
) -> Result<(), CoreError> {
    if adoption_date > today {
        return Err(CoreError::Validation(format!(
            "Adoption date {adoption_date} is in the future"
        )));
    }
    if adoption_date < admission_date {
        return Err(CoreError::Validation(format!(
            "Adoption date {adoption_date} is before admission date {admission_date}"
        )));
    }
    Ok(())
}

/// Status an animal should return to after one of its adoptions is removed.
///
/// Returns `Some(InShelter)` only when the animal is still marked adopted and
/// no other adoption record remains; otherwise the status is left alone.
pub fn status_after_adoption_removed(
    current: AnimalStatus,
    remaining_adoptions: i64,
) -> Option<AnimalStatus> {
    (current == AnimalStatus::Adopted && remaining_adoptions == 0)
        .then_some(AnimalStatus::InShelter)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn only_in_shelter_is_adoptable() {
        assert!(ensure_adoptable(AnimalStatus::InShelter).is_ok());
        assert_matches!(
            ensure_adoptable(AnimalStatus::Adopted),
            Err(CoreError::Conflict(_))
        );
        assert_matches!(
            ensure_adoptable(AnimalStatus::Died),
            Err(CoreError::Conflict(_))
        );
    }

    #[test]
    fn adoption_date_bounds() {
        let admission = date(2024, 1, 10);
        let today = date(2024, 2, 1);

        assert!(validate_adoption_date(admission, admission, today).is_ok());
        assert!(validate_adoption_date(today, admission, today).is_ok());
        assert_matches!(
            validate_adoption_date(date(2024, 1, 9), admission, today),
            Err(CoreError::Validation(msg)) if msg.contains("before admission")
        );
        assert_matches!(
            validate_adoption_date(date(2024, 2, 2), admission, today),
            Err(CoreError::Validation(msg)) if msg.contains("future")
        );
    }

    #[test]
    fn removing_last_adoption_returns_animal() {
        assert_eq!(
            status_after_adoption_removed(AnimalStatus::Adopted, 0),
            Some(AnimalStatus::InShelter)
        );
        assert_eq!(status_after_adoption_removed(AnimalStatus::Adopted, 1), None);
        assert_eq!(status_after_adoption_removed(AnimalStatus::Died, 0), None);
    }
}
