//! Repository for the `breeds` table.

use shelter_core::types::DbId;
use sqlx::PgPool;

use crate::models::breed::{Breed, CreateBreed, UpdateBreed};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, species_id, name, description, created_at, updated_at";

/// Provides CRUD operations for breeds.
pub struct BreedRepo;

impl BreedRepo {
    /// Insert a new breed, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateBreed) -> Result<Breed, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeds (species_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(input.species_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a breed by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds WHERE id = $1");
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List breeds ordered by name, optionally restricted to one species.
    pub async fn list(pool: &PgPool, species_id: Option<DbId>) -> Result<Vec<Breed>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM breeds
             WHERE ($1::BIGINT IS NULL OR species_id = $1)
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(species_id)
            .fetch_all(pool)
            .await
    }

    /// Update a breed. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateBreed,
    ) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!(
            "UPDATE breeds SET
                species_id = COALESCE($2, species_id),
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .bind(input.species_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Count animals referencing a breed.
    pub async fn count_animals(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM animals WHERE breed_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Delete a breed. Fails with a foreign-key violation while animals
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM breeds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
