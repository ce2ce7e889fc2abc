//! Integration tests for daily task generation persistence.

use chrono::{NaiveDate, Utc};
use shelter_core::daily_tasks::plan_daily_tasks;
use shelter_core::roles::UserRole;
use shelter_db::models::animal::CreateAnimal;
use shelter_db::models::default_entry::CreateDefaultEntry;
use shelter_db::models::species::CreateSpecies;
use shelter_db::models::user::CreateUser;
use shelter_db::repositories::{
    AnimalRepo, DailyTaskRepo, DefaultEntryRepo, SpeciesRepo, UserRepo,
};
use sqlx::PgPool;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn animal_with_entries(pool: &PgPool, name: &str, titles: &[&str]) -> i64 {
    let species = match SpeciesRepo::list(pool).await.unwrap().into_iter().next() {
        Some(s) => s,
        None => SpeciesRepo::create(
            pool,
            &CreateSpecies {
                name: "Dog".to_string(),
                description: None,
            },
        )
        .await
        .unwrap(),
    };
    let animal = AnimalRepo::create(
        pool,
        &CreateAnimal {
            name: name.to_string(),
            species_id: species.id,
            breed_id: None,
            sex: None,
            age: None,
            description: None,
            image_url: None,
            admission_date: date(2024, 1, 1),
        },
    )
    .await
    .unwrap();
    for title in titles {
        DefaultEntryRepo::create(
            pool,
            animal.id,
            &CreateDefaultEntry {
                title: title.to_string(),
                description: Some(format!("{title} daily")),
            },
        )
        .await
        .unwrap();
    }
    animal.id
}

async fn run_pass(pool: &PgPool, day: NaiveDate) -> u64 {
    let roster = DailyTaskRepo::load_roster(pool, day).await.unwrap();
    let planned = plan_daily_tasks(day, &roster);
    DailyTaskRepo::insert_planned(pool, &planned).await.unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_pass_copies_default_entries(pool: PgPool) {
    let day = date(2024, 1, 5);
    let animal_id = animal_with_entries(&pool, "A", &["Feed", "Walk"]).await;

    assert_eq!(run_pass(&pool, day).await, 1);

    let task = DailyTaskRepo::find_by_animal_and_date(&pool, animal_id, day)
        .await
        .unwrap()
        .expect("task for the pass date");
    assert_eq!(task.task.task_date, day);
    let titles: Vec<_> = task.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, ["Feed", "Walk"]);
    assert_eq!(task.entries[0].description.as_deref(), Some("Feed daily"));
    for entry in &task.entries {
        assert!(!entry.is_completed);
        assert!(entry.completed_at.is_none());
        assert!(entry.completed_by.is_none());
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_pass_same_day_creates_nothing(pool: PgPool) {
    let day = date(2024, 1, 5);
    let animal_id = animal_with_entries(&pool, "A", &["Feed", "Walk"]).await;

    assert_eq!(run_pass(&pool, day).await, 1);
    assert_eq!(run_pass(&pool, day).await, 0);

    let tasks = DailyTaskRepo::list_for_animal(&pool, animal_id, day, day)
        .await
        .unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].entries.len(), 2);

    // A new day gets a new task.
    assert_eq!(run_pass(&pool, date(2024, 1, 6)).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_stale_plan_is_skipped_by_constraint(pool: PgPool) {
    let day = date(2024, 1, 5);
    animal_with_entries(&pool, "A", &["Feed"]).await;

    // Two passes plan from the same roster; only the first commit creates rows.
    let roster = DailyTaskRepo::load_roster(&pool, day).await.unwrap();
    let planned = plan_daily_tasks(day, &roster);
    assert_eq!(DailyTaskRepo::insert_planned(&pool, &planned).await.unwrap(), 1);
    assert_eq!(DailyTaskRepo::insert_planned(&pool, &planned).await.unwrap(), 0);

    let (entries,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM daily_task_entries")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(entries, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_roster_is_read_in_one_snapshot(pool: PgPool) {
    let day = date(2024, 1, 5);
    let first = animal_with_entries(&pool, "A", &["Feed", "Walk"]).await;
    assert_eq!(run_pass(&pool, day).await, 1);
    let second = animal_with_entries(&pool, "B", &["Brush"]).await;

    let roster = DailyTaskRepo::load_roster(&pool, day).await.unwrap();
    let ids: Vec<_> = roster.iter().map(|a| a.animal_id).collect();
    assert_eq!(ids, [first, second]);
    assert_eq!(roster[0].task_dates, [day]);
    assert!(roster[1].task_dates.is_empty());
    let titles: Vec<_> = roster[0]
        .default_entries
        .iter()
        .map(|e| e.title.as_str())
        .collect();
    assert_eq!(titles, ["Feed", "Walk"]);

    // The read-only transaction is committed; the pool still takes writes.
    assert_eq!(run_pass(&pool, day).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_animal_without_defaults_gets_empty_task(pool: PgPool) {
    let day = date(2024, 1, 5);
    let bare = animal_with_entries(&pool, "Bare", &[]).await;
    let fed = animal_with_entries(&pool, "Fed", &["Feed"]).await;

    assert_eq!(run_pass(&pool, day).await, 2);

    let bare_task = DailyTaskRepo::find_by_animal_and_date(&pool, bare, day)
        .await
        .unwrap()
        .unwrap();
    assert!(bare_task.entries.is_empty());
    let fed_task = DailyTaskRepo::find_by_animal_and_date(&pool, fed, day)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fed_task.entries.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_entry_completion_toggle(pool: PgPool) {
    let day = date(2024, 1, 5);
    let animal_id = animal_with_entries(&pool, "A", &["Feed"]).await;
    run_pass(&pool, day).await;

    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "keeper".to_string(),
            email: "keeper@example.org".to_string(),
            password_hash: "x".to_string(),
            role_id: UserRole::Staff.id(),
        },
    )
    .await
    .unwrap();

    let task = DailyTaskRepo::find_by_animal_and_date(&pool, animal_id, day)
        .await
        .unwrap()
        .unwrap();
    let entry_id = task.entries[0].id;
    let now = Utc::now();

    let done = DailyTaskRepo::set_entry_completion(&pool, entry_id, true, now, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(done.is_completed);
    assert_eq!(done.completed_by, Some(user.id));
    assert!(done.completed_at.is_some());

    let undone = DailyTaskRepo::set_entry_completion(&pool, entry_id, false, now, user.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!undone.is_completed);
    assert!(undone.completed_at.is_none());
    assert!(undone.completed_by.is_none());

    assert!(DailyTaskRepo::set_entry_completion(&pool, 9999, true, now, user.id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_for_animal_newest_first(pool: PgPool) {
    let animal_id = animal_with_entries(&pool, "A", &["Feed"]).await;
    for d in 1..=3 {
        run_pass(&pool, date(2024, 1, d)).await;
    }

    let tasks = DailyTaskRepo::list_for_animal(&pool, animal_id, date(2024, 1, 2), date(2024, 1, 3))
        .await
        .unwrap();
    let dates: Vec<_> = tasks.iter().map(|t| t.task.task_date).collect();
    assert_eq!(dates, [date(2024, 1, 3), date(2024, 1, 2)]);
    assert!(tasks.iter().all(|t| t.entries.len() == 1));
}
