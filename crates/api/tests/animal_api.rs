//! HTTP-level tests for species, breeds, animals, default entries and events.

mod common;

use axum::http::StatusCode;
use common::{
    admin_token, body_json, build_test_app, create_animal, create_species, delete_auth,
    get_auth, post_json_auth, put_json_auth, staff_token,
};
use serde_json::json;
use sqlx::PgPool;

async fn create_breed(pool: &PgPool, admin: &str, species_id: i64, name: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/breeds",
        json!({ "species_id": species_id, "name": name }),
        admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

// ---------------------------------------------------------------------------
// Species and breeds
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_species_breeds_listing(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let cat = create_species(&pool, &admin, "Cat").await;
    create_breed(&pool, &admin, dog, "Beagle").await;
    create_breed(&pool, &admin, cat, "Siamese").await;

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/species/{dog}/breeds"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let names: Vec<_> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["name"].clone())
        .collect();
    assert_eq!(names, vec![json!("Beagle")]);

    let response = get_auth(
        build_test_app(pool),
        &format!("/api/v1/breeds?species_id={cat}"),
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["data"][0]["name"], "Siamese");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_breed_for_missing_species_is_404(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/breeds",
        json!({ "species_id": 999999, "name": "Nothing" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Animals
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admit_animal(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let staff = staff_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let beagle = create_breed(&pool, &admin, dog, "Beagle").await;

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/animals",
        json!({
            "name": "Bella",
            "species_id": dog,
            "breed_id": beagle,
            "age": 3,
            "image_url": "https://images.example.org/bella.jpg",
            "admission_date": "2024-06-10",
        }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "in_shelter");
    assert_eq!(json["sex"], "unknown");
    assert_eq!(json["species_name"], "Dog");
    assert_eq!(json["breed_name"], "Beagle");

    let id = json["id"].as_i64().unwrap();
    let response = get_auth(build_test_app(pool), &format!("/api/v1/animals/{id}"), &staff).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Bella");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_admission_rules(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let cat = create_species(&pool, &admin, "Cat").await;
    let siamese = create_breed(&pool, &admin, cat, "Siamese").await;

    // The test clock reads 2024-06-15.
    let future = json!({ "name": "Tomorrow", "species_id": dog, "admission_date": "2024-06-16" });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/animals",
        future,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let wrong_breed = json!({
        "name": "Mismatch",
        "species_id": dog,
        "breed_id": siamese,
        "admission_date": "2024-06-15",
    });
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/animals",
        wrong_breed,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let no_species = json!({
        "name": "Nowhere",
        "species_id": 999999,
        "admission_date": "2024-06-15",
    });
    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/animals",
        no_species,
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_animal_checks_breed_against_current_species(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let cat = create_species(&pool, &admin, "Cat").await;
    let siamese = create_breed(&pool, &admin, cat, "Siamese").await;
    let rex = create_animal(&pool, &admin, "Rex", dog).await;
    let id = rex["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{id}"),
        json!({ "breed_id": siamese }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/animals/{id}"),
        json!({ "species_id": cat, "breed_id": siamese, "age": 4 }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["species_name"], "Cat");
    assert_eq!(json["breed_name"], "Siamese");
    assert_eq!(json["age"], 4);
    assert_eq!(json["name"], "Rex");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_species_change_drops_old_breed(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let rabbit = create_species(&pool, &admin, "Rabbit").await;
    let beagle = create_breed(&pool, &admin, dog, "Beagle").await;
    let rex = create_animal(&pool, &admin, "Rex", dog).await;
    let id = rex["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{id}"),
        json!({ "breed_id": beagle }),
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["breed_name"], "Beagle");

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{id}"),
        json!({ "species_id": rabbit }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["species_name"], "Rabbit");
    assert!(json["breed_id"].is_null());
    assert!(json["breed_name"].is_null());

    // A breed sent with the new species must still belong to it.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{id}"),
        json!({ "breed_id": beagle }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/animals/{id}"),
        json!({ "species_id": dog, "breed_id": beagle }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["breed_name"], "Beagle");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_clears_nullable_fields(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let beagle = create_breed(&pool, &admin, dog, "Beagle").await;
    let rex = create_animal(&pool, &admin, "Rex", dog).await;
    let id = rex["id"].as_i64().unwrap();

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{id}"),
        json!({
            "breed_id": beagle,
            "age": 3,
            "description": "Friendly",
            "image_url": "https://images.example.org/rex.jpg",
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // Absent fields are kept.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{id}"),
        json!({ "name": "Rexy" }),
        &admin,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "Rexy");
    assert_eq!(json["breed_name"], "Beagle");
    assert_eq!(json["age"], 3);
    assert_eq!(json["description"], "Friendly");

    let response = put_json_auth(
        build_test_app(pool),
        &format!("/api/v1/animals/{id}"),
        json!({
            "breed_id": null,
            "age": null,
            "description": null,
            "image_url": null,
        }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["breed_id"].is_null());
    assert!(json["age"].is_null());
    assert!(json["description"].is_null());
    assert!(json["image_url"].is_null());
    assert_eq!(json["name"], "Rexy");
    assert_eq!(json["species_name"], "Dog");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_list_animals_filters_and_pages(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let cat = create_species(&pool, &admin, "Cat").await;
    create_animal(&pool, &admin, "Bella", dog).await;
    create_animal(&pool, &admin, "Bello", dog).await;
    create_animal(&pool, &admin, "Tom", cat).await;

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals?species_id={dog}&search=BEL&limit=1"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["total"], 2);
    assert_eq!(json["limit"], 1);
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get_auth(
        build_test_app(pool.clone()),
        "/api/v1/animals?status=died",
        &admin,
    )
    .await;
    assert_eq!(body_json(response).await["total"], 0);

    let response = get_auth(build_test_app(pool), "/api/v1/animals?status=lost", &admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_transitions(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let id = create_animal(&pool, &admin, "Rex", dog).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/animals/{id}/status");

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "status": "adopted" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        &uri,
        json!({ "status": "died" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "died");

    let response = put_json_auth(
        build_test_app(pool),
        &uri,
        json!({ "status": "in_shelter" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_animal_is_admin_only(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let staff = staff_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let id = create_animal(&pool, &admin, "Rex", dog).await["id"].as_i64().unwrap();
    let uri = format!("/api/v1/animals/{id}");

    let response = delete_auth(build_test_app(pool.clone()), &uri, &staff).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(build_test_app(pool.clone()), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(build_test_app(pool), &uri, &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Default entries
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_default_entries_are_scoped_to_animal(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let rex = create_animal(&pool, &admin, "Rex", dog).await["id"].as_i64().unwrap();
    let fido = create_animal(&pool, &admin, "Fido", dog).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{rex}/default-entries"),
        json!({ "title": "Feed", "description": "Two scoops" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let entry_id = body_json(response).await["id"].as_i64().unwrap();

    // Addressed through the wrong animal the entry does not exist.
    let response = put_json_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{fido}/default-entries/{entry_id}"),
        json!({ "title": "Walk" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{rex}/default-entries"),
        &admin,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["title"], "Feed");

    let response = post_json_auth(
        build_test_app(pool),
        "/api/v1/animals/999999/default-entries",
        json!({ "title": "Feed" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_events_for_animal_and_shelter(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let staff = staff_token(&pool).await;
    let dog = create_species(&pool, &admin, "Dog").await;
    let rex = create_animal(&pool, &admin, "Rex", dog).await["id"].as_i64().unwrap();

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/events",
        json!({ "animal_id": rex, "title": "Vet visit", "event_date": "2024-06-12T09:30:00Z" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let event = body_json(response).await;
    assert!(event["created_by"].is_number());

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/events",
        json!({ "title": "Open day", "event_date": "2024-06-20T10:00:00Z" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/events",
        json!({ "animal_id": 999999, "title": "Ghost", "event_date": "2024-06-20T10:00:00Z" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(
        build_test_app(pool.clone()),
        &format!("/api/v1/animals/{rex}/events"),
        &staff,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Vet visit");

    let response = get_auth(
        build_test_app(pool),
        "/api/v1/events?from=2024-06-15T00:00:00Z",
        &staff,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["data"][0]["title"], "Open day");
}

// ---------------------------------------------------------------------------
// Shelter configuration
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_shelter_configuration(pool: PgPool) {
    let admin = admin_token(&pool).await;
    let staff = staff_token(&pool).await;

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/shelter-configuration",
        json!({ "phone": "+49 30 1234567" }),
        &staff,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/shelter-configuration",
        json!({ "phone": "+49 30 1234567", "website": "https://shelter.example.org" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get_auth(build_test_app(pool), "/api/v1/shelter-configuration", &staff).await;
    let json = body_json(response).await;
    assert_eq!(json["phone"], "+49 30 1234567");
    assert_eq!(json["website"], "https://shelter.example.org");
}
