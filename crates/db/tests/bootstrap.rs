use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seeded lookup data.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    shelter_db::health_check(&pool).await.unwrap();

    for table in ["roles", "animal_statuses", "shelter_configuration"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert!(count.0 > 0, "{table} should have seed data, got 0 rows");
    }
}

/// Status ids are mirrored in code, so the seeded order must not drift.
#[sqlx::test(migrations = "./migrations")]
async fn test_animal_status_ids_match_code(pool: PgPool) {
    use shelter_core::animal::AnimalStatus;

    let rows: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM animal_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();

    for status in [AnimalStatus::InShelter, AnimalStatus::Adopted, AnimalStatus::Died] {
        assert!(
            rows.contains(&(status.id(), status.as_str().to_string())),
            "missing {status:?} in {rows:?}"
        );
    }
}

/// Role ids are mirrored in code as well.
#[sqlx::test(migrations = "./migrations")]
async fn test_role_ids_match_code(pool: PgPool) {
    use shelter_core::roles::UserRole;

    let rows: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();

    let expected: Vec<_> = UserRole::ALL
        .into_iter()
        .map(|role| (role.id(), role.as_str().to_string()))
        .collect();
    assert_eq!(rows, expected);
}
