//! Liveness and database reachability, mounted at the root rather than
//! under `/api`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    Degraded,
}

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: HealthStatus,
    pub version: &'static str,
    pub db_healthy: bool,
}

impl HealthReport {
    fn from_db_check(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy {
                HealthStatus::Ok
            } else {
                HealthStatus::Degraded
            },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// Always 200; a failed database round trip only degrades the status.
async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let db_healthy = setlist_db::health_check(&state.pool)
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "Database health check failed"))
        .is_ok();

    Json(HealthReport::from_db_check(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}
