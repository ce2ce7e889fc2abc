//! Handlers for the `/animals` resource (animal service).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelter_core::animal::{check_status_transition, validate_admission_date, AnimalStatus};
use shelter_core::error::CoreError;
use shelter_core::pagination::like_pattern;
use shelter_core::types::DbId;
use shelter_db::models::animal::{
    Animal, AnimalFilter, CreateAnimal, UpdateAnimal, UpdateAnimalStatus,
};
use shelter_db::repositories::{AdoptionRepo, AnimalRepo, BreedRepo};

use super::species::find_species;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::{AnimalListParams, PaginationParams};
use crate::response::PageResponse;
use crate::state::AppState;

/// POST /api/v1/animals
///
/// Admit an animal. Status always starts as `in_shelter`.
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ValidatedJson(input): ValidatedJson<CreateAnimal>,
) -> AppResult<(StatusCode, Json<Animal>)> {
    validate_admission_date(input.admission_date, state.clock.today())?;
    find_species(&state, input.species_id).await?;
    ensure_breed_matches(&state, input.breed_id, input.species_id).await?;

    let animal = AnimalRepo::create(&state.pool, &input).await?;
    tracing::info!(animal_id = animal.id, user_id = user.user_id, "Animal admitted");
    Ok((StatusCode::CREATED, Json(animal)))
}

/// GET /api/v1/animals?status=&species_id=&search=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<AnimalListParams>,
) -> AppResult<Json<PageResponse<Animal>>> {
    let status_id = match params.status.as_deref() {
        Some(name) => Some(
            AnimalStatus::from_name(name)
                .ok_or_else(|| {
                    CoreError::Validation(format!(
                        "Unknown animal status '{name}' (expected in_shelter, adopted or died)"
                    ))
                })?
                .id(),
        ),
        None => None,
    };
    let filter = AnimalFilter {
        status_id,
        species_id: params.species_id,
        name_pattern: params.search.as_deref().and_then(like_pattern),
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();

    let data = AnimalRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = AnimalRepo::count(&state.pool, &filter).await?;
    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/animals/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Animal>> {
    Ok(Json(find_animal(&state, id).await?))
}

/// PUT /api/v1/animals/{id}
///
/// Partial update under the same rules as admission.
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    ValidatedJson(mut input): ValidatedJson<UpdateAnimal>,
) -> AppResult<Json<Animal>> {
    let current = find_animal(&state, id).await?;

    if let Some(admission_date) = input.admission_date {
        validate_admission_date(admission_date, state.clock.today())?;
    }
    let species_id = input.species_id.unwrap_or(current.species_id);
    if species_id != current.species_id {
        find_species(&state, species_id).await?;
        // The old breed belongs to the old species.
        if input.breed_id.is_none() {
            input.breed_id = Some(None);
        }
    }
    let breed_id = match input.breed_id {
        Some(breed_id) => breed_id,
        None => current.breed_id,
    };
    ensure_breed_matches(&state, breed_id, species_id).await?;

    let animal = AnimalRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))?;
    Ok(Json(animal))
}

/// PUT /api/v1/animals/{id}/status
///
/// Manual status change. `died` is terminal and `adopted` is only reachable
/// through an adoption record.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateAnimalStatus>,
) -> AppResult<Json<Animal>> {
    let mut tx = state.pool.begin().await?;
    let animal = AnimalRepo::find_for_update(&mut *tx, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))?;
    let current = status_of(&animal)?;
    check_status_transition(current, input.status)?;

    AnimalRepo::set_status(&mut *tx, id, input.status.id()).await?;
    tx.commit().await?;

    tracing::info!(
        animal_id = id,
        user_id = user.user_id,
        from = current.as_str(),
        to = input.status.as_str(),
        "Animal status changed"
    );
    Ok(Json(find_animal(&state, id).await?))
}

/// DELETE /api/v1/animals/{id}
///
/// Hard delete, cascading to daily tasks, default entries and events.
/// Animals with adoption records are kept (409).
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_animal(&state, id).await?;
    if AdoptionRepo::count(&state.pool, Some(id)).await? > 0 {
        return Err(AppError::Core(CoreError::Conflict(
            "Animal has adoption records and cannot be deleted".into(),
        )));
    }

    if AnimalRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an animal or fail with 404.
pub(crate) async fn find_animal(state: &AppState, id: DbId) -> AppResult<Animal> {
    AnimalRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Animal",
            id,
        }))
}

/// Typed status of a loaded animal.
pub(crate) fn status_of(animal: &Animal) -> AppResult<AnimalStatus> {
    AnimalStatus::from_id(animal.status_id).ok_or_else(|| {
        AppError::InternalError(format!(
            "Animal {} has unknown status id {}",
            animal.id, animal.status_id
        ))
    })
}

/// A breed, when given, must exist and belong to `species_id`.
async fn ensure_breed_matches(
    state: &AppState,
    breed_id: Option<DbId>,
    species_id: DbId,
) -> AppResult<()> {
    let Some(breed_id) = breed_id else {
        return Ok(());
    };
    let breed = BreedRepo::find_by_id(&state.pool, breed_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Breed",
            id: breed_id,
        }))?;
    if breed.species_id != species_id {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Breed '{}' does not belong to species {species_id}",
            breed.name
        ))));
    }
    Ok(())
}
