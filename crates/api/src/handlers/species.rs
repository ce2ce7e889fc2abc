//! Handlers for the `/species` resource.
//!
//! Reads need any signed-in user; writes need `admin`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use shelter_core::error::CoreError;
use shelter_core::types::DbId;
use shelter_db::models::breed::Breed;
use shelter_db::models::species::{CreateSpecies, Species, UpdateSpecies};
use shelter_db::repositories::{BreedRepo, SpeciesRepo};

use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/species
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<CreateSpecies>,
) -> AppResult<(StatusCode, Json<Species>)> {
    let species = SpeciesRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(species)))
}

/// GET /api/v1/species
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
) -> AppResult<Json<DataResponse<Vec<Species>>>> {
    let species = SpeciesRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: species }))
}

/// GET /api/v1/species/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Species>> {
    Ok(Json(find_species(&state, id).await?))
}

/// PUT /api/v1/species/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateSpecies>,
) -> AppResult<Json<Species>> {
    let species = SpeciesRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Species",
            id,
        }))?;
    Ok(Json(species))
}

/// DELETE /api/v1/species/{id}
///
/// Species still referenced by breeds or animals are rejected with 409.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if SpeciesRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Species",
            id,
        }))
    }
}

/// GET /api/v1/species/{id}/breeds
pub async fn list_breeds(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<Breed>>>> {
    find_species(&state, id).await?;
    let breeds = BreedRepo::list(&state.pool, Some(id)).await?;
    Ok(Json(DataResponse { data: breeds }))
}

/// Load a species or fail with 404.
pub(crate) async fn find_species(state: &AppState, id: DbId) -> AppResult<Species> {
    SpeciesRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Species",
            id,
        }))
}
