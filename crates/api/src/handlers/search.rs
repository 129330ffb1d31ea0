//! Handler for global search across shows, bands and venues.
//!
//! The three category queries are independent: a failing category is
//! logged and returned as an empty array so the others still come back.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use chrono::Utc;
use setlist_core::limits::{parse_limit, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
use setlist_core::search::validate_query;
use setlist_db::models::search::SearchResults;
use setlist_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/search
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let q = validate_query(params.q.as_deref())?;
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT)?;
    let pool = &state.pool;

    let shows = or_empty(
        SearchRepo::shows(pool, q, Utc::now(), limit).await,
        "Failed to search shows",
    );
    let bands = or_empty(
        SearchRepo::bands(pool, q, limit).await,
        "Failed to search bands",
    );
    let venues = or_empty(
        SearchRepo::venues(pool, q, limit).await,
        "Failed to search venues",
    );

    tracing::debug!(
        q,
        shows = shows.len(),
        bands = bands.len(),
        venues = venues.len(),
        "Search executed",
    );

    Ok(Json(DataResponse::new(SearchResults {
        shows,
        bands,
        venues,
    })))
}

fn or_empty<T>(result: Result<Vec<T>, sqlx::Error>, message: &'static str) -> Vec<T> {
    result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "{message}");
        Vec::new()
    })
}
