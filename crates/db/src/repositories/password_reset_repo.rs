//! Repository for the `password_reset_tokens` table.

use shelter_core::types::{DbId, Timestamp};
use sqlx::{PgExecutor, PgPool};

use crate::models::password_reset::PasswordResetToken;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, token_hash, expires_at, used_at, created_at, updated_at";

/// Provides operations for password reset tokens.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Store a new reset token hash for a user.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        token_hash: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_reset_tokens (user_id, token_hash, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(user_id)
            .bind(token_hash)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Atomically consume an unused, unexpired token.
    ///
    /// Returns the token row if it was valid at `now`; a second call with the
    /// same hash returns `None`.
    pub async fn consume<'e>(
        executor: impl PgExecutor<'e>,
        token_hash: &str,
        now: Timestamp,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "UPDATE password_reset_tokens SET used_at = $2
             WHERE token_hash = $1 AND used_at IS NULL AND expires_at > $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token_hash)
            .bind(now)
            .fetch_optional(executor)
            .await
    }

    /// Invalidate every outstanding token of a user (on a new request or a
    /// successful reset).
    pub async fn invalidate_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        now: Timestamp,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE password_reset_tokens SET used_at = $2
             WHERE user_id = $1 AND used_at IS NULL",
        )
        .bind(user_id)
        .bind(now)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }
}
