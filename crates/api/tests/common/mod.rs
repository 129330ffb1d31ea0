#![allow(dead_code)]

use std::net::IpAddr;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::Value;
use setlist_api::config::{LogFormat, ServerConfig};
use setlist_api::router::build_app_router;
use setlist_api::state::AppState;
use setlist_core::types::{DbId, Timestamp};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        database_url: String::new(),
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_body_bytes: 1024 * 1024,
        timezone: chrono_tz::America::New_York,
        db_max_connections: 5,
        db_acquire_timeout_secs: 5,
        log_level: "debug".to_string(),
        log_format: LogFormat::Pretty,
    }
}

/// Build the full application router, with the production middleware stack,
/// on top of the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState::new(pool, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// GET `uri`, assert the status and return the parsed body.
pub async fn get_json(app: Router, uri: &str, status: StatusCode) -> Value {
    let response = get(app, uri).await;
    assert_eq!(response.status(), status, "GET {uri}");
    body_json(response).await
}

/// Assert the error envelope's `code` and return the `error` object.
pub fn assert_error_code(json: &Value, code: &str) -> Value {
    assert_eq!(json["error"]["code"], code, "unexpected body: {json}");
    json["error"].clone()
}

// ---------------------------------------------------------------------------
// Seed data
// ---------------------------------------------------------------------------

pub fn days_from_now(days: i64) -> Timestamp {
    Utc::now() + Duration::days(days)
}

pub async fn insert_venue(pool: &PgPool, name: &str, slug: &str, region: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO venues (name, slug, region) VALUES ($1, $2, $3) RETURNING id")
        .bind(name)
        .bind(slug)
        .bind(region)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_band(pool: &PgPool, name: &str, slug: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO bands (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn insert_genre(pool: &PgPool, name: &str, slug: &str) -> DbId {
    sqlx::query_scalar("INSERT INTO genres (name, slug) VALUES ($1, $2) RETURNING id")
        .bind(name)
        .bind(slug)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn tag_band(pool: &PgPool, band_id: DbId, genre_id: DbId) {
    sqlx::query("INSERT INTO band_genres (band_id, genre_id) VALUES ($1, $2)")
        .bind(band_id)
        .bind(genre_id)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_show(
    pool: &PgPool,
    venue_id: DbId,
    title: &str,
    date: Timestamp,
    price: Option<f64>,
) -> DbId {
    sqlx::query_scalar(
        "INSERT INTO shows (venue_id, title, date, price_min, price_max, source) \
         VALUES ($1, $2, $3, $4::numeric, $4::numeric, 'manual') RETURNING id",
    )
    .bind(venue_id)
    .bind(title)
    .bind(date)
    .bind(price)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn link_band(
    pool: &PgPool,
    show_id: DbId,
    band_id: DbId,
    is_headliner: bool,
    order: i32,
) {
    sqlx::query(
        "INSERT INTO show_bands (show_id, band_id, is_headliner, performance_order) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(show_id)
    .bind(band_id)
    .bind(is_headliner)
    .bind(order)
    .execute(pool)
    .await
    .unwrap();
}
