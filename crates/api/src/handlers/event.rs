//! Handlers for the `/events` resource.
//!
//! Events are dated notes (vet visits, intake checks, open days). An event may
//! concern one animal or the shelter as a whole.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use shelter_core::error::CoreError;
use shelter_core::types::DbId;
use shelter_db::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};
use shelter_db::repositories::EventRepo;

use super::animal::find_animal;
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAuth;
use crate::query::{EventListParams, PaginationParams};
use crate::response::PageResponse;
use crate::state::AppState;

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    ValidatedJson(input): ValidatedJson<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    if let Some(animal_id) = input.animal_id {
        find_animal(&state, animal_id).await?;
    }
    let event = EventRepo::create(&state.pool, &input, user.user_id).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events?animal_id=&from=&to=&limit=&offset=
pub async fn list(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Query(params): Query<EventListParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    let filter = EventFilter {
        animal_id: params.animal_id,
        from: params.from,
        to: params.to,
    };
    let (limit, offset) = PaginationParams {
        limit: params.limit,
        offset: params.offset,
    }
    .resolve();
    page(&state, &filter, limit, offset).await
}

/// GET /api/v1/animals/{animal_id}/events?limit=&offset=
pub async fn list_for_animal(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(animal_id): Path<DbId>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<Event>>> {
    find_animal(&state, animal_id).await?;
    let filter = EventFilter {
        animal_id: Some(animal_id),
        ..Default::default()
    };
    let (limit, offset) = params.resolve();
    page(&state, &filter, limit, offset).await
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(event))
}

/// PUT /api/v1/events/{id}
pub async fn update(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateEvent>,
) -> AppResult<Json<Event>> {
    if let Some(animal_id) = input.animal_id {
        find_animal(&state, animal_id).await?;
    }
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found(id))?;
    Ok(Json(event))
}

/// DELETE /api/v1/events/{id}
pub async fn delete(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EventRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

async fn page(
    state: &AppState,
    filter: &EventFilter,
    limit: i64,
    offset: i64,
) -> AppResult<Json<PageResponse<Event>>> {
    if let (Some(from), Some(to)) = (filter.from, filter.to) {
        if from > to {
            return Err(AppError::Core(CoreError::Validation(
                "'from' must not be after 'to'".into(),
            )));
        }
    }
    let data = EventRepo::list(&state.pool, filter, limit, offset).await?;
    let total = EventRepo::count(&state.pool, filter).await?;
    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Event",
        id,
    })
}
