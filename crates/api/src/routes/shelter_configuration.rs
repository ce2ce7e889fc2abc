//! Route definitions for the `/shelter-configuration` singleton.

use axum::routing::get;
use axum::Router;

use crate::handlers::shelter_configuration;
use crate::state::AppState;

/// Routes mounted at `/shelter-configuration`.
///
/// ```text
/// GET /   -> get
/// PUT /   -> update (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(shelter_configuration::get).put(shelter_configuration::update),
    )
}
