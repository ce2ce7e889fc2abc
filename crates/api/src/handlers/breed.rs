//! Handlers for the `/breeds` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelter_core::error::CoreError;
use shelter_core::types::DbId;
use shelter_db::models::breed::{Breed, CreateBreed, UpdateBreed};
use shelter_db::repositories::BreedRepo;

use super::species::find_species;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::BreedListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/breeds
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateBreed>,
) -> AppResult<(StatusCode, Json<Breed>)> {
    find_species(&state, input.species_id).await?;
    let breed = BreedRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(breed)))
}

/// GET /api/v1/breeds?species_id=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<BreedListParams>,
) -> AppResult<Json<DataResponse<Vec<Breed>>>> {
    let breeds = BreedRepo::list(&state.pool, params.species_id).await?;
    Ok(Json(DataResponse { data: breeds }))
}

/// GET /api/v1/breeds/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Breed>> {
    let breed = BreedRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Breed", id }))?;
    Ok(Json(breed))
}

/// PUT /api/v1/breeds/{id}
///
/// Moving a breed to another species is refused while animals use it, since
/// their species and breed would no longer agree.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBreed>,
) -> AppResult<Json<Breed>> {
    let current = BreedRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Breed", id }))?;

    if let Some(species_id) = input.species_id.filter(|&s| s != current.species_id) {
        find_species(&state, species_id).await?;
        if BreedRepo::count_animals(&state.pool, id).await? > 0 {
            return Err(AppError::Core(CoreError::Conflict(
                "Breed is assigned to animals and cannot change species".into(),
            )));
        }
    }

    let breed = BreedRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Breed", id }))?;
    Ok(Json(breed))
}

/// DELETE /api/v1/breeds/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if BreedRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Breed", id }))
    }
}
