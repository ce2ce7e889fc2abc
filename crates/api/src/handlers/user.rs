//! Handlers for the `/users` resource (user management).
//!
//! All handlers require the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use shelter_core::error::CoreError;
use shelter_core::roles::UserRole;
use shelter_core::types::DbId;
use shelter_db::models::user::{UpdateUser, User, UserResponse};
use shelter_db::repositories::{RefreshTokenRepo, UserRepo};
use validator::Validate;

use crate::auth::password::{check_password_policy, hash_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::rbac::RequireAdmin;
use crate::query::PaginationParams;
use crate::response::PageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /users/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// Role name (`admin` or `staff`).
    pub role: Option<String>,
    pub is_active: Option<bool>,
}

/// Request body for `POST /users/{id}/reset-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct AdminResetPasswordRequest {
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/users
///
/// List users, newest first.
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PageResponse<UserResponse>>> {
    let (limit, offset) = params.resolve();
    let users = UserRepo::list(&state.pool, limit, offset).await?;
    let total = UserRepo::count(&state.pool).await?;

    let data = users
        .iter()
        .map(|u| Ok(UserResponse::from_user(u, role_of(u)?)))
        .collect::<AppResult<Vec<_>>>()?;

    Ok(Json(PageResponse {
        data,
        total,
        limit,
        offset,
    }))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = find_user(&state, id).await?;
    Ok(Json(UserResponse::from_user(&user, role_of(&user)?)))
}

/// PUT /api/v1/users/{id}
///
/// Update profile fields, role or active flag (not the password). Admins
/// cannot demote or deactivate themselves.
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let role = input.role.as_deref().map(parse_role).transpose()?;

    if id == admin.user_id {
        let demoting = role.is_some_and(|r| r != admin.role);
        if demoting || input.is_active == Some(false) {
            return Err(AppError::Core(CoreError::Conflict(
                "Admins cannot demote or deactivate their own account".into(),
            )));
        }
    }

    let update_dto = UpdateUser {
        username: input.username,
        email: input.email,
        role_id: role.map(UserRole::id),
        is_active: input.is_active,
    };

    let user = UserRepo::update(&state.pool, id, &update_dto)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    if !user.is_active {
        RefreshTokenRepo::revoke_all_for_user(&state.pool, user.id).await?;
    }

    Ok(Json(UserResponse::from_user(&user, role_of(&user)?)))
}

/// DELETE /api/v1/users/{id}
///
/// Soft-deactivate a user and revoke their refresh tokens. Returns 204.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Admins cannot deactivate their own account".into(),
        )));
    }

    // Already-inactive users are left as they are.
    find_user(&state, id).await?;
    UserRepo::deactivate(&state.pool, id).await?;
    RefreshTokenRepo::revoke_all_for_user(&state.pool, id).await?;

    tracing::info!(user_id = id, deactivated_by = admin.user_id, "User deactivated");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/users/{id}/reset-password
///
/// Admin-initiated password reset. Clears lockout and revokes refresh tokens.
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    ValidatedJson(input): ValidatedJson<AdminResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let user = find_user(&state, id).await?;

    check_password_policy(
        &input.new_password,
        &user.username,
        state.config.accounts.min_password_length,
    )?;
    let hashed = hash_password(&input.new_password)?;

    let mut tx = state.pool.begin().await?;
    UserRepo::update_password(&mut *tx, id, &hashed).await?;
    RefreshTokenRepo::revoke_all_for_user(&mut *tx, id).await?;
    tx.commit().await?;

    tracing::info!(user_id = id, reset_by = admin.user_id, "Password reset by admin");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_user(state: &AppState, id: DbId) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))
}

/// Typed role of a loaded user.
pub(crate) fn role_of(user: &User) -> AppResult<UserRole> {
    user.role().ok_or_else(|| {
        AppError::InternalError(format!(
            "User {} has unknown role id {}",
            user.id, user.role_id
        ))
    })
}

/// Parse a role name from a request body.
pub(crate) fn parse_role(name: &str) -> AppResult<UserRole> {
    UserRole::from_name(name).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "Unknown role '{name}' (expected admin or staff)"
        )))
    })
}
