//! Repository for the `species` table.

use shelter_core::types::DbId;
use sqlx::PgPool;

use crate::models::species::{CreateSpecies, Species, UpdateSpecies};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Provides CRUD operations for species.
pub struct SpeciesRepo;

impl SpeciesRepo {
    /// Insert a new species, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateSpecies) -> Result<Species, sqlx::Error> {
        let query = format!(
            "INSERT INTO species (name, description)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a species by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species WHERE id = $1");
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all species ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Species>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM species ORDER BY name ASC");
        sqlx::query_as::<_, Species>(&query).fetch_all(pool).await
    }

    /// Update a species. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateSpecies,
    ) -> Result<Option<Species>, sqlx::Error> {
        let query = format!(
            "UPDATE species SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Species>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a species. Fails with a foreign-key violation while breeds or
    /// animals still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM species WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
