//! Request handlers, one module per aggregate.
//!
//! Handlers check access through the `RequireAuth`/`RequireAdmin` extractors,
//! apply the domain rules from `shelter_core`, and delegate persistence to the
//! repositories in `shelter_db`. Errors map to HTTP through [`AppError`].
//!
//! [`AppError`]: crate::error::AppError

pub mod adoption;
pub mod animal;
pub mod auth;
pub mod breed;
pub mod daily_task;
pub mod default_entry;
pub mod event;
pub mod shelter_configuration;
pub mod species;
pub mod user;
