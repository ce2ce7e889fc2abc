//! Repository for `daily_tasks` and `daily_task_entries`.

use std::collections::{HashMap, HashSet};

use shelter_core::daily_tasks::{EntryTemplate, PlannedDailyTask, RosterAnimal};
use shelter_core::types::{Date, DbId, Timestamp};
use sqlx::PgPool;

use crate::models::daily_task::{DailyTask, DailyTaskEntry, DailyTaskWithEntries};

/// Column list for `daily_tasks`.
const TASK_COLUMNS: &str = "id, animal_id, task_date, created_at, updated_at";

/// Column list for `daily_task_entries`.
const ENTRY_COLUMNS: &str = "id, daily_task_id, title, description, is_completed, \
                              completed_at, completed_by, created_at, updated_at";

/// Provides the generation roster, the batch insert and task/entry reads.
pub struct DailyTaskRepo;

impl DailyTaskRepo {
    /// Load every animal with its tasks on `date` and its default entries.
    ///
    /// The three reads share one REPEATABLE READ snapshot, so an animal
    /// admitted mid-load is either fully present or absent.
    pub async fn load_roster(pool: &PgPool, date: Date) -> Result<Vec<RosterAnimal>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL REPEATABLE READ READ ONLY")
            .execute(&mut *tx)
            .await?;

        let animal_ids: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM animals ORDER BY id ASC")
            .fetch_all(&mut *tx)
            .await?;

        let existing: HashSet<DbId> =
            sqlx::query_as::<_, (DbId,)>("SELECT animal_id FROM daily_tasks WHERE task_date = $1")
                .bind(date)
                .fetch_all(&mut *tx)
                .await?
                .into_iter()
                .map(|(id,)| id)
                .collect();

        let mut defaults: HashMap<DbId, Vec<EntryTemplate>> = HashMap::new();
        let rows: Vec<(DbId, String, Option<String>)> = sqlx::query_as(
            "SELECT animal_id, title, description FROM daily_task_default_entries
             ORDER BY animal_id ASC, id ASC",
        )
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        for (animal_id, title, description) in rows {
            defaults
                .entry(animal_id)
                .or_default()
                .push(EntryTemplate { title, description });
        }

        Ok(animal_ids
            .into_iter()
            .map(|(animal_id,)| RosterAnimal {
                animal_id,
                task_dates: if existing.contains(&animal_id) {
                    vec![date]
                } else {
                    Vec::new()
                },
                default_entries: defaults.remove(&animal_id).unwrap_or_default(),
            })
            .collect())
    }

    /// Insert planned tasks and their entries in one transaction.
    ///
    /// A task that already exists for its animal and date (a concurrent pass
    /// got there first) is skipped together with its entries. Returns the
    /// number of tasks created.
    pub async fn insert_planned(
        pool: &PgPool,
        planned: &[PlannedDailyTask],
    ) -> Result<u64, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = 0;

        for task in planned {
            let inserted: Option<(DbId,)> = sqlx::query_as(
                "INSERT INTO daily_tasks (animal_id, task_date)
                 VALUES ($1, $2)
                 ON CONFLICT ON CONSTRAINT uq_daily_tasks_animal_id_task_date DO NOTHING
                 RETURNING id",
            )
            .bind(task.animal_id)
            .bind(task.task_date)
            .fetch_optional(&mut *tx)
            .await?;

            let Some((task_id,)) = inserted else {
                continue;
            };

            for entry in &task.entries {
                sqlx::query(
                    "INSERT INTO daily_task_entries (daily_task_id, title, description)
                     VALUES ($1, $2, $3)",
                )
                .bind(task_id)
                .bind(&entry.title)
                .bind(&entry.description)
                .execute(&mut *tx)
                .await?;
            }
            created += 1;
        }

        tx.commit().await?;
        Ok(created)
    }

    /// List an animal's tasks between `from` and `to` (inclusive), newest first.
    pub async fn list_for_animal(
        pool: &PgPool,
        animal_id: DbId,
        from: Date,
        to: Date,
    ) -> Result<Vec<DailyTaskWithEntries>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM daily_tasks
             WHERE animal_id = $1 AND task_date BETWEEN $2 AND $3
             ORDER BY task_date DESC"
        );
        let tasks = sqlx::query_as::<_, DailyTask>(&query)
            .bind(animal_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await?;
        Self::attach_entries(pool, tasks).await
    }

    /// Find the task of an animal for one date.
    pub async fn find_by_animal_and_date(
        pool: &PgPool,
        animal_id: DbId,
        date: Date,
    ) -> Result<Option<DailyTaskWithEntries>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM daily_tasks WHERE animal_id = $1 AND task_date = $2"
        );
        let task = sqlx::query_as::<_, DailyTask>(&query)
            .bind(animal_id)
            .bind(date)
            .fetch_optional(pool)
            .await?;
        match task {
            Some(task) => Ok(Self::attach_entries(pool, vec![task]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Mark an entry completed (recording when and by whom) or clear it.
    ///
    /// Returns `None` if no entry with the given `id` exists.
    pub async fn set_entry_completion(
        pool: &PgPool,
        id: DbId,
        is_completed: bool,
        at: Timestamp,
        by: DbId,
    ) -> Result<Option<DailyTaskEntry>, sqlx::Error> {
        let query = format!(
            "UPDATE daily_task_entries SET
                is_completed = $2,
                completed_at = CASE WHEN $2 THEN $3 ELSE NULL END,
                completed_by = CASE WHEN $2 THEN $4 ELSE NULL END
             WHERE id = $1
             RETURNING {ENTRY_COLUMNS}"
        );
        sqlx::query_as::<_, DailyTaskEntry>(&query)
            .bind(id)
            .bind(is_completed)
            .bind(at)
            .bind(by)
            .fetch_optional(pool)
            .await
    }

    async fn attach_entries(
        pool: &PgPool,
        tasks: Vec<DailyTask>,
    ) -> Result<Vec<DailyTaskWithEntries>, sqlx::Error> {
        if tasks.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<DbId> = tasks.iter().map(|t| t.id).collect();
        let query = format!(
            "SELECT {ENTRY_COLUMNS} FROM daily_task_entries
             WHERE daily_task_id = ANY($1)
             ORDER BY id ASC"
        );
        let entries = sqlx::query_as::<_, DailyTaskEntry>(&query)
            .bind(&ids)
            .fetch_all(pool)
            .await?;

        let mut by_task: HashMap<DbId, Vec<DailyTaskEntry>> = HashMap::new();
        for entry in entries {
            by_task.entry(entry.daily_task_id).or_default().push(entry);
        }

        Ok(tasks
            .into_iter()
            .map(|task| DailyTaskWithEntries {
                entries: by_task.remove(&task.id).unwrap_or_default(),
                task,
            })
            .collect())
    }
}
