use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;

pub type DbPool = sqlx::PgPool;

/// Connections kept open even when idle.
const MIN_CONNECTIONS: u32 = 5;

/// Connections are recycled after this long regardless of use.
const MAX_LIFETIME: Duration = Duration::from_secs(60 * 60);

/// Idle connections above the minimum are closed after this long.
const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Create a connection pool from a database URL.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(MIN_CONNECTIONS.min(max_connections))
        .max_lifetime(MAX_LIFETIME)
        .idle_timeout(IDLE_TIMEOUT)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await.map(|_| ())
}

/// Embedded schema migrations.
pub fn migrator() -> Migrator {
    sqlx::migrate!("./migrations")
}

/// Apply any pending migrations.
pub async fn run_migrations(pool: &DbPool) -> Result<(), MigrateError> {
    migrator().run(pool).await
}
