//! Repository for the `animals` table.
//!
//! Reads join `species`, `breeds` and `animal_statuses` so every returned
//! [`Animal`] carries display names alongside the ids.

use shelter_core::animal::StatusId;
use shelter_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::animal::{Animal, AnimalFilter, CreateAnimal, UpdateAnimal};

/// Joined column list, qualified for `FROM animals a`.
const COLUMNS: &str = "a.id, a.name, a.species_id, s.name AS species_name, \
                        a.breed_id, b.name AS breed_name, a.status_id, st.name AS status, \
                        a.sex, a.age, a.description, a.image_url, a.admission_date, \
                        a.created_at, a.updated_at";

/// Joins shared by every read.
const JOINS: &str = "JOIN species s ON s.id = a.species_id \
                     LEFT JOIN breeds b ON b.id = a.breed_id \
                     JOIN animal_statuses st ON st.id = a.status_id";

/// Filter predicate over `$1` status, `$2` species and `$3` name pattern.
const FILTER: &str = "($1::SMALLINT IS NULL OR a.status_id = $1) \
                      AND ($2::BIGINT IS NULL OR a.species_id = $2) \
                      AND ($3::TEXT IS NULL OR a.name ILIKE $3)";

/// Provides CRUD operations for animals.
pub struct AnimalRepo;

impl AnimalRepo {
    /// Insert a new animal (status in-shelter), returning the joined row.
    pub async fn create(pool: &PgPool, input: &CreateAnimal) -> Result<Animal, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                INSERT INTO animals
                    (name, species_id, breed_id, sex, age, description, image_url, admission_date)
                VALUES ($1, $2, $3, COALESCE($4, 'unknown'), $5, $6, $7, $8)
                RETURNING *
             )
             SELECT {COLUMNS} FROM a {JOINS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(&input.name)
            .bind(input.species_id)
            .bind(input.breed_id)
            .bind(&input.sex)
            .bind(input.age)
            .bind(&input.description)
            .bind(&input.image_url)
            .bind(input.admission_date)
            .fetch_one(pool)
            .await
    }

    /// Find an animal by its internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM animals a {JOINS} WHERE a.id = $1");
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock an animal row for the rest of the transaction and return it.
    pub async fn find_for_update<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM animals a {JOINS} WHERE a.id = $1 FOR UPDATE OF a"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List one page of animals matching `filter`, newest admission first.
    pub async fn list(
        pool: &PgPool,
        filter: &AnimalFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Animal>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM animals a {JOINS}
             WHERE {FILTER}
             ORDER BY a.admission_date DESC, a.id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(filter.status_id)
            .bind(filter.species_id)
            .bind(&filter.name_pattern)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count animals matching `filter`.
    pub async fn count(pool: &PgPool, filter: &AnimalFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM animals a WHERE {FILTER}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(filter.status_id)
            .bind(filter.species_id)
            .bind(&filter.name_pattern)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update an animal. Absent fields keep their stored value; nullable
    /// fields sent as `Some(None)` are cleared.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAnimal,
    ) -> Result<Option<Animal>, sqlx::Error> {
        let query = format!(
            "WITH a AS (
                UPDATE animals SET
                    name = COALESCE($2, name),
                    species_id = COALESCE($3, species_id),
                    breed_id = CASE WHEN $4 THEN $5 ELSE breed_id END,
                    sex = COALESCE($6, sex),
                    age = CASE WHEN $7 THEN $8 ELSE age END,
                    description = CASE WHEN $9 THEN $10 ELSE description END,
                    image_url = CASE WHEN $11 THEN $12 ELSE image_url END,
                    admission_date = COALESCE($13, admission_date)
                WHERE id = $1
                RETURNING *
             )
             SELECT {COLUMNS} FROM a {JOINS}"
        );
        sqlx::query_as::<_, Animal>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.species_id)
            .bind(input.breed_id.is_some())
            .bind(input.breed_id.flatten())
            .bind(&input.sex)
            .bind(input.age.is_some())
            .bind(input.age.flatten())
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|v| v.as_deref()))
            .bind(input.image_url.is_some())
            .bind(input.image_url.as_ref().and_then(|v| v.as_deref()))
            .bind(input.admission_date)
            .fetch_optional(pool)
            .await
    }

    /// Set an animal's status. Returns `true` if the row was updated.
    pub async fn set_status<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        status_id: StatusId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE animals SET status_id = $2 WHERE id = $1")
            .bind(id)
            .bind(status_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete an animal. Daily tasks, default entries and events cascade;
    /// adoptions block the delete with a foreign-key violation.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM animals WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
