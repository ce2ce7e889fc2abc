//! Repository for the `adoptions` table.
//!
//! Creating and removing an adoption also moves the animal's status, so those
//! two methods take any executor and are run inside a caller-owned transaction.

use shelter_core::types::DbId;
use sqlx::{PgExecutor, PgPool};

use crate::models::adoption::{Adoption, CreateAdoption, UpdateAdoption};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, animal_id, adopter_first_name, adopter_last_name, adopter_email, \
                        adopter_phone, adopter_address, adoption_date, notes, created_by, \
                        created_at, updated_at";

/// Provides CRUD operations for adoptions.
pub struct AdoptionRepo;

impl AdoptionRepo {
    /// Insert a new adoption, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateAdoption,
        created_by: DbId,
    ) -> Result<Adoption, sqlx::Error> {
        let query = format!(
            "INSERT INTO adoptions
                (animal_id, adopter_first_name, adopter_last_name, adopter_email,
                 adopter_phone, adopter_address, adoption_date, notes, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(input.animal_id)
            .bind(&input.adopter_first_name)
            .bind(&input.adopter_last_name)
            .bind(&input.adopter_email)
            .bind(&input.adopter_phone)
            .bind(&input.adopter_address)
            .bind(input.adoption_date)
            .bind(&input.notes)
            .bind(created_by)
            .fetch_one(executor)
            .await
    }

    /// Find an adoption by its internal ID.
    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM adoptions WHERE id = $1");
        sqlx::query_as::<_, Adoption>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// List one page of adoptions, optionally for one animal, latest first.
    pub async fn list(
        pool: &PgPool,
        animal_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Adoption>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM adoptions
             WHERE ($1::BIGINT IS NULL OR animal_id = $1)
             ORDER BY adoption_date DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(animal_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count adoptions, optionally for one animal.
    pub async fn count<'e>(
        executor: impl PgExecutor<'e>,
        animal_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM adoptions WHERE ($1::BIGINT IS NULL OR animal_id = $1)",
        )
        .bind(animal_id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Update adoption details. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAdoption,
    ) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!(
            "UPDATE adoptions SET
                adopter_first_name = COALESCE($2, adopter_first_name),
                adopter_last_name = COALESCE($3, adopter_last_name),
                adopter_email = COALESCE($4, adopter_email),
                adopter_phone = COALESCE($5, adopter_phone),
                adopter_address = COALESCE($6, adopter_address),
                adoption_date = COALESCE($7, adoption_date),
                notes = COALESCE($8, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Adoption>(&query)
            .bind(id)
            .bind(&input.adopter_first_name)
            .bind(&input.adopter_last_name)
            .bind(&input.adopter_email)
            .bind(&input.adopter_phone)
            .bind(&input.adopter_address)
            .bind(input.adoption_date)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an adoption, returning the removed row.
    pub async fn delete<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Adoption>, sqlx::Error> {
        let query = format!("DELETE FROM adoptions WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Adoption>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }
}
