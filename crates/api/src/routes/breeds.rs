//! Route definitions for the `/breeds` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::breed;
use crate::state::AppState;

/// Routes mounted at `/breeds`.
///
/// ```text
/// GET    /       -> list (?species_id)
/// POST   /       -> create (admin)
/// GET    /{id}   -> get_by_id
/// PUT    /{id}   -> update (admin)
/// DELETE /{id}   -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(breed::list).post(breed::create))
        .route(
            "/{id}",
            get(breed::get_by_id).put(breed::update).delete(breed::delete),
        )
}
