//! Route definitions for the `/animals` resource and its sub-resources.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{animal, daily_task, default_entry, event};
use crate::state::AppState;

/// Routes mounted at `/animals`.
///
/// ```text
/// GET    /                                  -> animal::list
/// POST   /                                  -> animal::create
/// GET    /{id}                              -> animal::get_by_id
/// PUT    /{id}                              -> animal::update
/// DELETE /{id}                              -> animal::delete (admin)
/// PUT    /{id}/status                       -> animal::update_status
///
/// GET    /{id}/default-entries              -> default_entry::list
/// POST   /{id}/default-entries              -> default_entry::create
/// GET    /{id}/default-entries/{entry_id}   -> default_entry::get_by_id
/// PUT    /{id}/default-entries/{entry_id}   -> default_entry::update
/// DELETE /{id}/default-entries/{entry_id}   -> default_entry::delete
///
/// GET    /{id}/daily-tasks                  -> daily_task::list_for_animal
/// GET    /{id}/daily-tasks/{date}           -> daily_task::get_by_date
///
/// GET    /{id}/events                       -> event::list_for_animal
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(animal::list).post(animal::create))
        .route(
            "/{id}",
            get(animal::get_by_id)
                .put(animal::update)
                .delete(animal::delete),
        )
        .route("/{id}/status", put(animal::update_status))
        .route(
            "/{id}/default-entries",
            get(default_entry::list).post(default_entry::create),
        )
        .route(
            "/{id}/default-entries/{entry_id}",
            get(default_entry::get_by_id)
                .put(default_entry::update)
                .delete(default_entry::delete),
        )
        .route("/{id}/daily-tasks", get(daily_task::list_for_animal))
        .route("/{id}/daily-tasks/{date}", get(daily_task::get_by_date))
        .route("/{id}/events", get(event::list_for_animal))
}
