//! Route definitions for the `/species` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::species;
use crate::state::AppState;

/// Routes mounted at `/species`.
///
/// ```text
/// GET    /              -> list
/// POST   /              -> create (admin)
/// GET    /{id}          -> get_by_id
/// PUT    /{id}          -> update (admin)
/// DELETE /{id}          -> delete (admin)
/// GET    /{id}/breeds   -> list_breeds
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(species::list).post(species::create))
        .route(
            "/{id}",
            get(species::get_by_id)
                .put(species::update)
                .delete(species::delete),
        )
        .route("/{id}/breeds", get(species::list_breeds))
}
