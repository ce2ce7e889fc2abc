//! Route definitions for daily task entries and manual generation.

use axum::routing::{post, put};
use axum::Router;

use crate::handlers::daily_task;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// PUT  /daily-task-entries/{id}   -> update_entry
/// POST /daily-tasks/generate      -> generate (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/daily-task-entries/{id}", put(daily_task::update_entry))
        .route("/daily-tasks/generate", post(daily_task::generate))
}
