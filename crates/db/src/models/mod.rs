//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` + `Validate` create DTO for inserts
//! - A `Deserialize` + `Validate` update DTO (all `Option` fields) for patches
//!
//! Nullable columns in update DTOs are `Option<Option<T>>`: absent keeps the
//! stored value, `null` clears it.

pub mod adoption;
pub mod animal;
pub mod breed;
pub mod daily_task;
pub mod default_entry;
pub mod event;
pub mod password_reset;
pub mod refresh_token;
pub mod shelter_configuration;
pub mod species;
pub mod user;

use serde::{Deserialize, Deserializer};

/// Deserialize a present field (including `null`) as `Some(..)`. Pair with
/// `#[serde(default)]` so an absent field stays `None`.
pub(crate) fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
