//! Handlers for `/animals/{animal_id}/default-entries`.
//!
//! Default entries are the per-animal checklist templates copied into each
//! day's task. Every route is scoped to the animal in the path; an entry that
//! belongs to another animal is reported as missing.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelter_core::error::CoreError;
use shelter_core::types::DbId;
use shelter_db::models::default_entry::{CreateDefaultEntry, DefaultEntry, UpdateDefaultEntry};
use shelter_db::repositories::DefaultEntryRepo;

use super::animal::find_animal;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAuth;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/animals/{animal_id}/default-entries
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(animal_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<DefaultEntry>>>> {
    find_animal(&state, animal_id).await?;
    let entries = DefaultEntryRepo::list_by_animal(&state.pool, animal_id).await?;
    Ok(Json(DataResponse { data: entries }))
}

/// POST /api/v1/animals/{animal_id}/default-entries
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(animal_id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<CreateDefaultEntry>,
) -> AppResult<(StatusCode, Json<DefaultEntry>)> {
    find_animal(&state, animal_id).await?;
    let entry = DefaultEntryRepo::create(&state.pool, animal_id, &input).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /api/v1/animals/{animal_id}/default-entries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((animal_id, id)): Path<(DbId, DbId)>,
) -> AppResult<Json<DefaultEntry>> {
    let entry = DefaultEntryRepo::find_by_id(&state.pool, animal_id, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(entry))
}

/// PUT /api/v1/animals/{animal_id}/default-entries/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((animal_id, id)): Path<(DbId, DbId)>,
    ValidatedJson(input): ValidatedJson<UpdateDefaultEntry>,
) -> AppResult<Json<DefaultEntry>> {
    let entry = DefaultEntryRepo::update(&state.pool, animal_id, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(entry))
}

/// DELETE /api/v1/animals/{animal_id}/default-entries/{id}
///
/// Tasks already generated keep their copied entries.
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((animal_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    if DefaultEntryRepo::delete(&state.pool, animal_id, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "DefaultEntry",
        id,
    })
}
