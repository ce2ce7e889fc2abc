//! Shared helpers for the HTTP integration tests.
//!
//! Requests go straight into the router via `tower::ServiceExt::oneshot`, so
//! no TCP listener is involved. Every test app runs on a [`ManualClock`]
//! pinned to [`TEST_NOW`] unless a test asks for another instant.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{DateTime, TimeZone, Utc};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use shelter_api::auth::password::hash_password;
use shelter_api::config::{AccountConfig, DailyTaskConfig, ServerConfig, TokenConfig};
use shelter_api::mail::Mailer;
use shelter_api::router::build_app_router;
use shelter_api::state::AppState;
use shelter_core::clock::ManualClock;
use shelter_core::roles::UserRole;
use shelter_core::types::DbId;
use shelter_db::models::user::{CreateUser, User};
use shelter_db::repositories::UserRepo;

/// Seeded role ids.
pub const ADMIN_ROLE_ID: DbId = UserRole::Admin as DbId;
pub const STAFF_ROLE_ID: DbId = UserRole::Staff as DbId;

/// Password given to every user created by [`create_user`].
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// The instant test apps believe it is: 2024-06-15 12:00 UTC.
pub fn test_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
}

/// Build a test `ServerConfig` with safe defaults. Mail is disabled and the
/// daily task job is not spawned by tests.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: String::new(),
        db_max_connections: 5,
        tokens: TokenConfig {
            secret: "test-secret-not-for-production".to_string(),
            access_expiry_mins: 15,
            refresh_expiry_days: 7,
        },
        daily_tasks: DailyTaskConfig {
            enabled: false,
            ..Default::default()
        },
        accounts: AccountConfig::default(),
        email: None,
    }
}

/// Full application router (same middleware stack as production) at
/// [`test_now`].
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_at(pool, test_now())
}

/// Full application router whose clock is pinned to `now`.
pub fn build_test_app_at(pool: PgPool, now: DateTime<Utc>) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: Arc::new(ManualClock::new(now)),
        mailer: None,
    };
    build_app_router(state, &config)
}

/// Full application router that sends mail through `mailer`.
pub fn build_test_app_with_mailer(pool: PgPool, mailer: Mailer) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        clock: Arc::new(ManualClock::new(test_now())),
        mailer: Some(Arc::new(mailer)),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

fn request(
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Users and sessions
// ---------------------------------------------------------------------------

/// Insert a user with [`TEST_PASSWORD`] directly through the repository.
pub async fn create_user(pool: &PgPool, username: &str, role_id: DbId) -> User {
    UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@shelter.test"),
            password_hash: hash_password(TEST_PASSWORD).unwrap(),
            role_id,
        },
    )
    .await
    .unwrap()
}

/// Log in through the API and return the full auth response.
pub async fn login(pool: &PgPool, username: &str, password: &str) -> serde_json::Value {
    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        serde_json::json!({ "username": username, "password": password }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK, "login of {username} failed");
    body_json(response).await
}

/// Create a user with the given role and return an access token for it.
pub async fn token_for(pool: &PgPool, username: &str, role_id: DbId) -> String {
    create_user(pool, username, role_id).await;
    let json = login(pool, username, TEST_PASSWORD).await;
    json["access_token"].as_str().unwrap().to_string()
}

pub async fn admin_token(pool: &PgPool) -> String {
    token_for(pool, "admin", ADMIN_ROLE_ID).await
}

pub async fn staff_token(pool: &PgPool) -> String {
    token_for(pool, "keeper", STAFF_ROLE_ID).await
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Create a species through the API (needs an admin token) and return its id.
pub async fn create_species(pool: &PgPool, admin: &str, name: &str) -> i64 {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/species",
        serde_json::json!({ "name": name }),
        admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Admit an animal through the API and return the response body.
pub async fn create_animal(
    pool: &PgPool,
    token: &str,
    name: &str,
    species_id: i64,
) -> serde_json::Value {
    let response = post_json_auth(
        build_test_app(pool.clone()),
        "/api/v1/animals",
        serde_json::json!({
            "name": name,
            "species_id": species_id,
            "sex": "female",
            "admission_date": "2024-06-01",
        }),
        token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}
