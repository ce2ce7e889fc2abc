//! Pure domain logic for the shelter backend.
//!
//! Nothing in this crate touches the network or the database. Types and
//! rules here are shared by `shelter_db` (persistence) and `shelter_api`
//! (HTTP surface and background jobs).

pub mod adoption;
pub mod animal;
pub mod clock;
pub mod daily_tasks;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod types;
