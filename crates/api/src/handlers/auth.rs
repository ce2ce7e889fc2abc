//! Handlers for the `/auth` resource (account service).
//!
//! Login, token refresh and logout, admin registration, the caller's own
//! profile and password, and the self-service password reset flow.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::USER_AGENT;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::{Deserialize, Serialize};
use shelter_core::error::CoreError;
use shelter_core::roles::UserRole;
use shelter_core::types::DbId;
use shelter_db::models::refresh_token::CreateRefreshToken;
use shelter_db::models::user::{CreateUser, User, UserResponse};
use shelter_db::repositories::{PasswordResetRepo, RefreshTokenRepo, UserRepo};
use validator::Validate;

use super::user::{parse_role, role_of};
use crate::auth::jwt::issue_access_token;
use crate::auth::opaque::{self, OpaqueToken};
use crate::auth::password::{check_password_policy, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Maximum consecutive failed login attempts before locking the account.
const MAX_FAILED_ATTEMPTS: i32 = 5;

/// Duration in minutes to lock an account after exceeding failed attempts.
const LOCK_DURATION_MINS: i64 = 15;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize, Validate)]
pub struct RefreshRequest {
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    pub password: String,
    /// Role name; defaults to `staff`.
    pub role: Option<String>,
}

/// Request body for `POST /auth/change-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1))]
    pub current_password: String,
    pub new_password: String,
}

/// Request body for `POST /auth/forgot-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email)]
    pub email: String,
}

/// Request body for `POST /auth/reset-password`.
#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1))]
    pub token: String,
    pub new_password: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    pub user: UserInfo,
}

/// Public user info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct UserInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub role: UserRole,
}

// ---------------------------------------------------------------------------
// Session handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Authenticate with username + password. Returns access and refresh tokens.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        ))
    };

    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(invalid)?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let now = state.clock.now();
    if user.locked_until.is_some_and(|until| until > now) {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is temporarily locked. Try again later.".into(),
        )));
    }

    if !verify_password(&input.password, &user.password_hash)? {
        let lock_until = now + chrono::Duration::minutes(LOCK_DURATION_MINS);
        if UserRepo::record_failed_login(&state.pool, user.id, MAX_FAILED_ATTEMPTS, lock_until)
            .await?
        {
            tracing::warn!(user_id = user.id, %lock_until, "Account locked after failed logins");
        }

        return Err(invalid());
    }

    UserRepo::record_successful_login(&state.pool, user.id).await?;

    let response = create_auth_response(&state, &user, user_agent(&headers)).await?;

    tracing::info!(user_id = user.id, "User logged in");
    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens. The
/// presented token is revoked (rotation).
pub async fn refresh(
    State(state): State<AppState>,
    headers: HeaderMap,
    ValidatedJson(input): ValidatedJson<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let invalid = || {
        AppError::Core(CoreError::Unauthorized(
            "Invalid or expired refresh token".into(),
        ))
    };

    let token_hash = opaque::digest(&input.refresh_token);
    let stored = RefreshTokenRepo::find_active_by_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(invalid)?;

    // Lost race with a concurrent refresh of the same token.
    if !RefreshTokenRepo::revoke(&state.pool, stored.id).await? {
        return Err(invalid());
    }

    let user = UserRepo::find_by_id(&state.pool, stored.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.is_active {
        return Err(AppError::Core(CoreError::Forbidden(
            "Account is deactivated".into(),
        )));
    }

    let response = create_auth_response(&state, &user, user_agent(&headers)).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Revoke all refresh tokens of the authenticated user. Returns 204 No Content.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> AppResult<StatusCode> {
    let revoked = RefreshTokenRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await?;
    tracing::info!(user_id = auth_user.user_id, revoked, "User logged out");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Account handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create a new account (admin only). The role defaults to `staff`.
pub async fn register(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    ValidatedJson(input): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let role = match input.role.as_deref() {
        Some(name) => parse_role(name)?,
        None => UserRole::Staff,
    };

    check_password_policy(
        &input.password,
        &input.username,
        state.config.accounts.min_password_length,
    )?;
    let password_hash = hash_password(&input.password)?;

    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            email: input.email,
            password_hash,
            role_id: role.id(),
        },
    )
    .await?;

    tracing::info!(
        user_id = user.id,
        created_by = admin.user_id,
        role = role.as_str(),
        "User registered"
    );
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::from_user(&user, role)),
    ))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;
    Ok(Json(UserResponse::from_user(&user, role_of(&user)?)))
}

/// POST /api/v1/auth/change-password
///
/// Requires the current password. All refresh tokens are revoked afterwards.
pub async fn change_password(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(input): ValidatedJson<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: auth_user.user_id,
        }))?;

    if !verify_password(&input.current_password, &user.password_hash)? {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Current password is incorrect".into(),
        )));
    }

    check_password_policy(
        &input.new_password,
        &user.username,
        state.config.accounts.min_password_length,
    )?;
    let password_hash = hash_password(&input.new_password)?;

    let mut tx = state.pool.begin().await?;
    UserRepo::update_password(&mut *tx, user.id, &password_hash).await?;
    RefreshTokenRepo::revoke_all_for_user(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/forgot-password
///
/// Always answers 204 so the response does not reveal whether the address
/// belongs to an account.
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<StatusCode> {
    let Some(user) = UserRepo::find_by_email(&state.pool, &input.email).await? else {
        tracing::debug!("Password reset requested for unknown address");
        return Ok(StatusCode::NO_CONTENT);
    };
    if !user.is_active {
        tracing::debug!(user_id = user.id, "Password reset requested for inactive account");
        return Ok(StatusCode::NO_CONTENT);
    }

    let accounts = &state.config.accounts;
    let now = state.clock.now();
    let token = OpaqueToken::generate();
    let expires_at = now + chrono::Duration::minutes(accounts.password_reset_expiry_mins);

    PasswordResetRepo::invalidate_for_user(&state.pool, user.id, now).await?;
    PasswordResetRepo::create(&state.pool, user.id, &token.digest, expires_at).await?;

    match &state.mailer {
        // Delivered in the background so the response time does not depend
        // on whether the address matched an account.
        Some(mailer) => {
            let mailer = Arc::clone(mailer);
            let link = reset_link(&accounts.password_reset_url, &token.secret);
            let expiry_mins = accounts.password_reset_expiry_mins;
            tokio::spawn(async move {
                if let Err(e) = mailer
                    .send_password_reset(&user.email, &user.username, &link, expiry_mins)
                    .await
                {
                    tracing::error!(
                        user_id = user.id,
                        error = %e,
                        "Failed to send password reset email"
                    );
                }
            });
        }
        None => {
            tracing::warn!(
                user_id = user.id,
                %expires_at,
                "Password reset requested but SMTP is not configured; no email sent"
            );
        }
    }

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/reset-password
///
/// Consume a reset token and set a new password. Clears any lockout and
/// revokes all refresh tokens.
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    let now = state.clock.now();
    let mut tx = state.pool.begin().await?;

    let token = PasswordResetRepo::consume(&mut *tx, &opaque::digest(&input.token), now)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".into()))?;

    let user = UserRepo::find_by_id(&state.pool, token.user_id)
        .await?
        .ok_or_else(|| AppError::BadRequest("Invalid or expired reset token".into()))?;

    check_password_policy(
        &input.new_password,
        &user.username,
        state.config.accounts.min_password_length,
    )?;
    let password_hash = hash_password(&input.new_password)?;

    UserRepo::update_password(&mut *tx, user.id, &password_hash).await?;
    PasswordResetRepo::invalidate_for_user(&mut *tx, user.id, now).await?;
    RefreshTokenRepo::revoke_all_for_user(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "Password reset completed");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Issue an access token and a fresh refresh token, persisting the latter.
async fn create_auth_response(
    state: &AppState,
    user: &User,
    user_agent: Option<String>,
) -> AppResult<AuthResponse> {
    let role = role_of(user)?;
    let tokens = &state.config.tokens;
    let now = chrono::Utc::now();
    let access = issue_access_token(user.id, role, now, tokens)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let refresh = OpaqueToken::generate();
    RefreshTokenRepo::create(
        &state.pool,
        &CreateRefreshToken {
            user_id: user.id,
            token_hash: refresh.digest,
            expires_at: now + tokens.refresh_ttl(),
            user_agent,
        },
    )
    .await?;

    Ok(AuthResponse {
        access_token: access.token,
        refresh_token: refresh.secret,
        expires_in: access.expires_in,
        user: UserInfo {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role,
        },
    })
}

fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.chars().take(255).collect())
}

/// Append the token to the configured reset page URL.
fn reset_link(base: &str, token: &str) -> String {
    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}token={token}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_link_appends_token() {
        assert_eq!(
            reset_link("http://localhost:5173/reset-password", "abc"),
            "http://localhost:5173/reset-password?token=abc"
        );
        assert_eq!(
            reset_link("https://shelter.example/reset?lang=en", "abc"),
            "https://shelter.example/reset?lang=en&token=abc"
        );
    }
}
