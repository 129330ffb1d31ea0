//! Handlers for band listing, band detail and similar-band discovery.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use chrono::Utc;
use setlist_core::error::CoreError;
use setlist_core::limits::{parse_limit, DEFAULT_SIMILAR_BANDS_LIMIT, MAX_SIMILAR_BANDS_LIMIT};
use setlist_db::models::band::BandShowItem;
use setlist_db::repositories::{BandRepo, GenreRepo};

use crate::converters::into_page;
use crate::enrichment::{attach_genres, attach_shared_genres};
use crate::error::{AppResult, QueryContext};
use crate::filters::BandFilter;
use crate::query::{page_request, BandListParams, LimitParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/bands
///
/// `q` runs a full-text search; otherwise `genre` slugs filter the list;
/// otherwise every band is listed by name. Always paginated.
pub async fn list_bands(
    State(state): State<AppState>,
    query: Result<Query<BandListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let page = page_request(params.page.as_deref(), params.per_page.as_deref())?;
    let (limit, offset) = (page.limit(), page.offset());
    let pool = &state.pool;

    let (mut bands, total) = match BandFilter::resolve(&params) {
        BandFilter::Search(q) => into_page(
            BandRepo::search(pool, &q, limit, offset)
                .await
                .context("search bands")?,
        ),
        BandFilter::Genres(slugs) => {
            let bands = BandRepo::list_by_genres(pool, &slugs, limit, offset)
                .await
                .context("list bands by genre")?;
            let total = BandRepo::count_by_genres(pool, &slugs)
                .await
                .context("count bands by genre")?;
            (bands, total)
        }
        BandFilter::All => into_page(
            BandRepo::list(pool, limit, offset)
                .await
                .context("list bands")?,
        ),
    };

    attach_genres(pool, &mut bands).await;

    Ok(Json(DataResponse::paginated(bands, page, total)))
}

/// GET /api/bands/{slug}
///
/// Band detail with all of its genres and every upcoming appearance.
pub async fn get_band(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let pool = &state.pool;

    let mut band = BandRepo::find_by_slug(pool, &slug)
        .await
        .context("get band")?
        .ok_or(CoreError::not_found("Band"))?;

    band.genres = match GenreRepo::for_band(pool, band.id).await {
        Ok(genres) => genres,
        Err(e) => {
            tracing::warn!(band_id = band.id, error = %e, "Failed to load band genres");
            Vec::new()
        }
    };

    band.upcoming_shows = BandRepo::upcoming_shows(pool, band.id, Utc::now())
        .await
        .context("get band shows")?
        .into_iter()
        .map(BandShowItem::from)
        .collect();

    Ok(Json(DataResponse::new(band)))
}

/// GET /api/bands/{slug}/similar
///
/// Bands sharing at least one genre with the given band, most shared
/// genres first. The source band is never included.
pub async fn similar_bands(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    query: Result<Query<LimitParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let limit = parse_limit(
        params.limit.as_deref(),
        DEFAULT_SIMILAR_BANDS_LIMIT,
        MAX_SIMILAR_BANDS_LIMIT,
    )?;
    let pool = &state.pool;

    let band = BandRepo::find_by_slug(pool, &slug)
        .await
        .context("get band")?
        .ok_or(CoreError::not_found("Band"))?;

    let mut similar = BandRepo::similar(pool, band.id, limit)
        .await
        .context("get similar bands")?;
    attach_shared_genres(pool, band.id, &mut similar).await;

    Ok(Json(DataResponse::new(similar)))
}
