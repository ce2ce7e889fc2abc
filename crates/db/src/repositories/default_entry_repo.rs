//! Repository for the `daily_task_default_entries` table.

use shelter_core::types::DbId;
use sqlx::PgPool;

use crate::models::default_entry::{CreateDefaultEntry, DefaultEntry, UpdateDefaultEntry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, animal_id, title, description, created_at, updated_at";

/// Provides CRUD operations for per-animal default entries.
pub struct DefaultEntryRepo;

impl DefaultEntryRepo {
    /// Add a default entry to an animal.
    pub async fn create(
        pool: &PgPool,
        animal_id: DbId,
        input: &CreateDefaultEntry,
    ) -> Result<DefaultEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO daily_task_default_entries (animal_id, title, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DefaultEntry>(&query)
            .bind(animal_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a default entry scoped to its animal.
    pub async fn find_by_id(
        pool: &PgPool,
        animal_id: DbId,
        id: DbId,
    ) -> Result<Option<DefaultEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_task_default_entries WHERE id = $1 AND animal_id = $2"
        );
        sqlx::query_as::<_, DefaultEntry>(&query)
            .bind(id)
            .bind(animal_id)
            .fetch_optional(pool)
            .await
    }

    /// List an animal's default entries in insertion order.
    pub async fn list_by_animal(
        pool: &PgPool,
        animal_id: DbId,
    ) -> Result<Vec<DefaultEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM daily_task_default_entries
             WHERE animal_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, DefaultEntry>(&query)
            .bind(animal_id)
            .fetch_all(pool)
            .await
    }

    /// Update a default entry. Existing daily tasks keep their copies.
    pub async fn update(
        pool: &PgPool,
        animal_id: DbId,
        id: DbId,
        input: &UpdateDefaultEntry,
    ) -> Result<Option<DefaultEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_task_default_entries SET
                title = COALESCE($3, title),
                description = COALESCE($4, description)
             WHERE id = $1 AND animal_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DefaultEntry>(&query)
            .bind(id)
            .bind(animal_id)
            .bind(&input.title)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Remove a default entry from an animal.
    pub async fn delete(pool: &PgPool, animal_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM daily_task_default_entries WHERE id = $1 AND animal_id = $2")
                .bind(id)
                .bind(animal_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
