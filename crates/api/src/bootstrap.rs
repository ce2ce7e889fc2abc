//! Start-up provisioning of the first administrator.

use shelter_core::roles::UserRole;
use shelter_db::models::user::CreateUser;
use shelter_db::repositories::UserRepo;
use shelter_db::DbPool;

use crate::auth::password::{check_password_policy, hash_password};
use crate::config::BootstrapAdminConfig;
use crate::error::AppResult;

/// Create the configured admin unless a user with that username exists.
///
/// Returns `true` when an account was created. The password must satisfy the
/// same policy as any other account.
pub async fn ensure_admin(
    pool: &DbPool,
    admin: &BootstrapAdminConfig,
    min_password_length: usize,
) -> AppResult<bool> {
    if UserRepo::find_by_username(pool, &admin.username)
        .await?
        .is_some()
    {
        return Ok(false);
    }

    check_password_policy(&admin.password, &admin.username, min_password_length)?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            email: admin.email.clone(),
            password_hash: hash_password(&admin.password)?,
            role_id: UserRole::Admin.id(),
        },
    )
    .await?;
    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap admin created");
    Ok(true)
}
