//! Handlers for the venue directory.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use chrono::Utc;
use setlist_core::error::CoreError;
use setlist_core::limits::VENUE_UPCOMING_SHOWS_LIMIT;
use setlist_db::repositories::VenueRepo;

use crate::enrichment::attach_lineups;
use crate::error::{AppResult, QueryContext};
use crate::query::{non_blank, VenueListParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/venues
///
/// Every venue ordered by name, with its count of upcoming shows. Repeated
/// `region` values restrict the list to venues in any of those regions.
pub async fn list_venues(
    State(state): State<AppState>,
    query: Result<Query<VenueListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let now = Utc::now();
    let regions = non_blank(&params.region);

    let venues = if regions.is_empty() {
        VenueRepo::list(&state.pool, now).await.context("list venues")?
    } else {
        VenueRepo::list_by_regions(&state.pool, now, &regions)
            .await
            .context("list venues by region")?
    };

    Ok(Json(DataResponse::new(venues)))
}

/// GET /api/venues/{slug}
///
/// Venue detail with its next upcoming shows and their lineups.
pub async fn get_venue(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let mut venue = VenueRepo::find_by_slug(&state.pool, &slug)
        .await
        .context("get venue")?
        .ok_or(CoreError::not_found("Venue"))?;

    let mut shows = VenueRepo::upcoming_shows(
        &state.pool,
        venue.id,
        Utc::now(),
        VENUE_UPCOMING_SHOWS_LIMIT,
    )
    .await
    .context("get venue shows")?;
    attach_lineups(&state.pool, &mut shows).await;
    venue.upcoming_shows = shows;

    Ok(Json(DataResponse::new(venue)))
}
