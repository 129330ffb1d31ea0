//! Handler for band-submitted show listings.
//!
//! The request is validated field by field in a fixed order so the first
//! violation is the one reported. Once the show row exists, each band is
//! resolved and linked independently: a band that cannot be created or
//! linked is logged and skipped, and the show is still returned as created.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::json;
use setlist_core::dates::{parse_show_date, parse_time_of_day};
use setlist_core::error::CoreError;
use setlist_core::submission::{
    ensure_future, validate_age_restriction, validate_band_names, validate_prices,
    SOURCE_BAND_SUBMITTED, STATUS_SCHEDULED,
};
use setlist_core::types::DbId;
use setlist_db::models::show::CreateShow;
use setlist_db::repositories::{BandRepo, ShowRepo, VenueRepo};
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppResult, QueryContext};
use crate::state::AppState;

/// Request body for `POST /api/shows`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateShowRequest {
    #[validate(range(min = 1, message = "venue_id is required"))]
    pub venue_id: DbId,
    #[validate(length(min = 1, message = "date is required"))]
    pub date: String,
    pub image_url: Option<String>,
    pub doors_time: Option<String>,
    pub show_time: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ticket_url: Option<String>,
    pub age_restriction: Option<String>,
    #[validate(length(min = 1, message = "at least one band is required"))]
    pub bands: Vec<CreateShowBand>,
}

/// One lineup entry of a submission. `Serialize` lets validation errors
/// echo the rejected value.
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateShowBand {
    pub name: String,
    pub is_headliner: Option<bool>,
    pub performance_order: Option<i32>,
}

/// POST /api/shows
pub async fn create_show(
    State(state): State<AppState>,
    payload: Result<Json<CreateShowRequest>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(req) = payload?;
    req.validate().map_err(|e| {
        CoreError::validation("Invalid request body", json!({ "error": e.to_string() }))
    })?;

    let pool = &state.pool;

    let venue_exists = VenueRepo::exists(pool, req.venue_id)
        .await
        .context("check venue exists")?;
    if !venue_exists {
        return Err(CoreError::not_found("Venue").into());
    }

    let date = parse_show_date(&req.date, state.config.timezone)?;
    ensure_future(date, Utc::now())?;
    validate_prices(req.price_min, req.price_max)?;
    validate_age_restriction(req.age_restriction.as_deref())?;
    validate_band_names(req.bands.iter().map(|b| b.name.as_str()))?;

    let input = CreateShow {
        venue_id: req.venue_id,
        title: None,
        image_url: req.image_url,
        date,
        doors_time: parse_time_of_day(req.doors_time.as_deref()),
        show_time: parse_time_of_day(req.show_time.as_deref()),
        price_min: req.price_min,
        price_max: req.price_max,
        ticket_url: req.ticket_url,
        age_restriction: req.age_restriction,
        status: STATUS_SCHEDULED.to_string(),
        source: SOURCE_BAND_SUBMITTED.to_string(),
    };

    let created = ShowRepo::create(pool, &input).await.context("create show")?;

    let mut linked = 0usize;
    for band in &req.bands {
        if link_submitted_band(pool, created.id, band).await {
            linked += 1;
        }
    }

    tracing::info!(
        show_id = created.id,
        venue_id = input.venue_id,
        bands = req.bands.len(),
        linked,
        "Show submitted",
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Resolve a band by exact name (creating it if absent) and add it to the
/// show. Returns whether the band ended up on the lineup.
async fn link_submitted_band(pool: &PgPool, show_id: DbId, band: &CreateShowBand) -> bool {
    let name = band.name.trim();

    let Some(band_id) = find_or_create_band(pool, name).await else {
        return false;
    };

    let is_headliner = band.is_headliner.unwrap_or(false);
    let performance_order = band.performance_order.unwrap_or(0);

    match ShowRepo::link_band(pool, show_id, band_id, is_headliner, performance_order).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(show_id, band_id, error = %e, "Failed to link band to show");
            false
        }
    }
}

async fn find_or_create_band(pool: &PgPool, name: &str) -> Option<DbId> {
    match BandRepo::find_by_name(pool, name).await {
        Ok(Some(existing)) => return Some(existing.id),
        Ok(None) => {}
        Err(e) => {
            tracing::error!(name, error = %e, "Failed to look up band");
            return None;
        }
    }

    match BandRepo::create_with_unique_slug(pool, name).await {
        Ok(Some(created)) => {
            tracing::debug!(band_id = created.id, slug = %created.slug, "Created band");
            Some(created.id)
        }
        Ok(None) => {
            tracing::error!(name, "Failed to create band: no free slug");
            None
        }
        Err(e) => {
            tracing::error!(name, error = %e, "Failed to create band");
            None
        }
    }
}
