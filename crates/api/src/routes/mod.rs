pub mod adoptions;
pub mod animals;
pub mod auth;
pub mod breeds;
pub mod daily_tasks;
pub mod events;
pub mod health;
pub mod shelter_configuration;
pub mod species;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (auth)
/// /auth/register                                   register (admin)
/// /auth/me                                         current user (auth)
/// /auth/change-password                            change own password (auth)
/// /auth/forgot-password                            request reset mail (public)
/// /auth/reset-password                             reset with token (public)
///
/// /users                                           list (admin)
/// /users/{id}                                      get, update, deactivate
/// /users/{id}/reset-password                       set password (POST)
///
/// /species                                         list, create
/// /species/{id}                                    get, update, delete
/// /species/{id}/breeds                             list breeds of a species
///
/// /breeds                                          list (?species_id), create
/// /breeds/{id}                                     get, update, delete
///
/// /animals                                         list (?status, species_id, search), create
/// /animals/{id}                                    get, update, delete
/// /animals/{id}/status                             change status (PUT)
/// /animals/{id}/default-entries                    list, create
/// /animals/{id}/default-entries/{entry_id}         get, update, delete
/// /animals/{id}/daily-tasks                        history (?from, to)
/// /animals/{id}/daily-tasks/{date}                 task for one date
/// /animals/{id}/events                             events of an animal
///
/// /daily-task-entries/{id}                         complete / reopen (PUT)
/// /daily-tasks/generate                            run a generation pass (admin, POST)
///
/// /events                                          list (?animal_id, from, to), create
/// /events/{id}                                     get, update, delete
///
/// /adoptions                                       list (?animal_id), create
/// /adoptions/{id}                                  get, update, delete (admin)
///
/// /shelter-configuration                           get, update (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Accounts and sessions.
        .nest("/auth", auth::router())
        // User administration.
        .nest("/users", users::router())
        // Reference data.
        .nest("/species", species::router())
        .nest("/breeds", breeds::router())
        // Animals plus their default entries, task history and events.
        .nest("/animals", animals::router())
        // Daily task entries and manual generation.
        .merge(daily_tasks::router())
        .nest("/events", events::router())
        .nest("/adoptions", adoptions::router())
        .nest("/shelter-configuration", shelter_configuration::router())
}
