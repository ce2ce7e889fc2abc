//! Handlers for daily tasks and their checklist entries.

use axum::extract::{Path, Query, State};
use axum::Json;
use shelter_core::error::CoreError;
use shelter_core::types::{Date, DbId};
use shelter_db::models::daily_task::{DailyTaskEntry, DailyTaskWithEntries, UpdateEntryCompletion};
use shelter_db::repositories::DailyTaskRepo;

use super::animal::find_animal;
use crate::background::daily_tasks::{DailyTaskJob, PassSummary, PgDailyTaskStore};
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth};
use crate::query::DateRangeParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Days covered by the task history when no `from` is given (including `to`).
const DEFAULT_HISTORY_DAYS: i64 = 7;

/// GET /api/v1/animals/{animal_id}/daily-tasks?from=&to=
///
/// Tasks with their entries, newest first. Defaults to the last seven days.
pub async fn list_for_animal(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path(animal_id): Path<DbId>,
    Query(params): Query<DateRangeParams>,
) -> AppResult<Json<DataResponse<Vec<DailyTaskWithEntries>>>> {
    find_animal(&state, animal_id).await?;

    let to = params.to.unwrap_or_else(|| state.clock.today());
    let from = params
        .from
        .unwrap_or(to - chrono::Duration::days(DEFAULT_HISTORY_DAYS - 1));
    if from > to {
        return Err(AppError::Core(CoreError::Validation(format!(
            "'from' ({from}) must not be after 'to' ({to})"
        ))));
    }

    let tasks = DailyTaskRepo::list_for_animal(&state.pool, animal_id, from, to).await?;
    Ok(Json(DataResponse { data: tasks }))
}

/// GET /api/v1/animals/{animal_id}/daily-tasks/{date}
pub async fn get_by_date(
    State(state): State<AppState>,
    RequireAuth(_user): RequireAuth,
    Path((animal_id, date)): Path<(DbId, Date)>,
) -> AppResult<Json<DailyTaskWithEntries>> {
    find_animal(&state, animal_id).await?;
    DailyTaskRepo::find_by_animal_and_date(&state.pool, animal_id, date)
        .await?
        .map(Json)
        .ok_or_else(|| {
            AppError::NotFound(format!("Animal {animal_id} has no daily task for {date}"))
        })
}

/// PUT /api/v1/daily-task-entries/{id}
///
/// Completing an entry stamps the time and the caller; un-completing clears
/// both.
pub async fn update_entry(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEntryCompletion>,
) -> AppResult<Json<DailyTaskEntry>> {
    let entry = DailyTaskRepo::set_entry_completion(
        &state.pool,
        id,
        input.is_completed,
        state.clock.now(),
        user.user_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound {
        entity: "DailyTaskEntry",
        id,
    }))?;
    Ok(Json(entry))
}

/// POST /api/v1/daily-tasks/generate
///
/// Run one generation pass now, with the same logic as the nightly job.
pub async fn generate(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
) -> AppResult<Json<PassSummary>> {
    let job = DailyTaskJob::new(
        PgDailyTaskStore::new(state.pool.clone()),
        state.clock.clone(),
        state.config.daily_tasks.run_at,
    );
    let summary = job.run_pass().await?;
    tracing::info!(
        user_id = admin.user_id,
        date = %summary.date,
        created = summary.created,
        "Manual daily task pass"
    );
    Ok(Json(summary))
}
