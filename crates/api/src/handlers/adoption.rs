//! Handlers for the `/adoptions` resource (adoption service).
//!
//! Recording an adoption and removing one both change the animal's status;
//! each runs in a single transaction with the animal row locked.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelter_core::adoption::{
    ensure_adoptable, status_after_adoption_removed, validate_adoption_date,
};
use shelter_core::animal::AnimalStatus;
use shelter_core::error::CoreError;
use shelter_core::types::DbId;
use shelter_db::models::adoption::{Adoption, CreateAdoption, UpdateAdoption};
use shelter_db::repositories::{AdoptionRepo, AnimalRepo};

use super::animal::{find_animal, status_of};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::{AdoptionListParams, PaginationParams};
use crate::response::PageResponse;
use crate::state::AppState;

/// POST /api/v1/adoptions
///
/// The animal must be in the shelter. Inserts the adoption and marks the
/// animal adopted atomically.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ValidatedJson(input): ValidatedJson<CreateAdoption>,
) -> AppResult<(StatusCode, Json<Adoption>)> {
    let mut tx = state.pool.begin().await?;

    let animal = AnimalRepo::find_for_update(&mut *tx, input.animal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id: input.animal_id,
        }))?;
    ensure_adoptable(status_of(&animal)?)?;
    validate_adoption_date(input.adoption_date, animal.admission_date, state.clock.today())?;

    let adoption = AdoptionRepo::create(&mut *tx, &input, user.user_id).await?;
    AnimalRepo::set_status(&mut *tx, animal.id, AnimalStatus::Adopted.id()).await?;
    tx.commit().await?;

    tracing::info!(
        adoption_id = adoption.id,
        animal_id = animal.id,
        user_id = user.user_id,
        "Adoption recorded"
    );
    Ok((StatusCode::CREATED, Json(adoption)))
}

/// GET /api/v1/adoptions?animal_id=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<AdoptionListParams>,
) -> AppResult<Json<PageResponse<Adoption>>> {
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    let data = AdoptionRepo::list(&state.pool, params.animal_id, limit, offset).await?;
    let total = AdoptionRepo::count(&state.pool, params.animal_id).await?;
    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/adoptions/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Adoption>> {
    let adoption = AdoptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(adoption))
}

/// PUT /api/v1/adoptions/{id}
///
/// Adopter details, date and notes. A new date is checked against the
/// animal's admission date.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateAdoption>,
) -> AppResult<Json<Adoption>> {
    let current = AdoptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;

    if let Some(adoption_date) = input.adoption_date {
        let animal = find_animal(&state, current.animal_id).await?;
        validate_adoption_date(adoption_date, animal.admission_date, state.clock.today())?;
    }

    let adoption = AdoptionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(adoption))
}

/// DELETE /api/v1/adoptions/{id}
///
/// Removes the record. An animal left adopted with no other adoption returns
/// to the shelter.
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let mut tx = state.pool.begin().await?;

    let adoption = AdoptionRepo::delete(&mut *tx, id)
        .await?
        .ok_or(not_found(id))?;

    let animal = AnimalRepo::find_for_update(&mut *tx, adoption.animal_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id: adoption.animal_id,
        }))?;
    let remaining = AdoptionRepo::count(&mut *tx, Some(animal.id)).await?;

    if let Some(status) = status_after_adoption_removed(status_of(&animal)?, remaining) {
        AnimalRepo::set_status(&mut *tx, animal.id, status.id()).await?;
        tracing::info!(animal_id = animal.id, status = status.as_str(), "Animal status reverted");
    }
    tx.commit().await?;

    tracing::info!(adoption_id = id, user_id = admin.user_id, "Adoption deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Adoption",
        id,
    })
}
