//! Repository for the `events` table.

use shelter_core::types::DbId;
use sqlx::PgPool;

use crate::models::event::{CreateEvent, Event, EventFilter, UpdateEvent};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, animal_id, title, description, event_date, created_by, created_at, updated_at";

/// Filter predicate over `$1` animal, `$2` from and `$3` to.
const FILTER: &str = "($1::BIGINT IS NULL OR animal_id = $1) \
                      AND ($2::TIMESTAMPTZ IS NULL OR event_date >= $2) \
                      AND ($3::TIMESTAMPTZ IS NULL OR event_date <= $3)";

/// Provides CRUD operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Insert a new event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateEvent,
        created_by: DbId,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO events (animal_id, title, description, event_date, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(input.animal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// Find an event by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM events WHERE id = $1");
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of events matching `filter`, latest first.
    pub async fn list(
        pool: &PgPool,
        filter: &EventFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM events
             WHERE {FILTER}
             ORDER BY event_date DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(filter.animal_id)
            .bind(filter.from)
            .bind(filter.to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count events matching `filter`.
    pub async fn count(pool: &PgPool, filter: &EventFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM events WHERE {FILTER}");
        let (count,): (i64,) = sqlx::query_as(&query)
            .bind(filter.animal_id)
            .bind(filter.from)
            .bind(filter.to)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Update an event. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateEvent,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE events SET
                animal_id = COALESCE($2, animal_id),
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                event_date = COALESCE($5, event_date)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(id)
            .bind(input.animal_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.event_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete an event.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
