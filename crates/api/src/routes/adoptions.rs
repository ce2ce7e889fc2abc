//! Route definitions for the `/adoptions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::adoption;
use crate::state::AppState;

/// Routes mounted at `/adoptions`.
///
/// ```text
/// GET    /       -> list (?animal_id, limit, offset)
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(adoption::list).post(adoption::create))
        .route(
            "/{id}",
            get(adoption::get_by_id)
                .put(adoption::update)
                .delete(adoption::delete),
        )
}
