//! Handlers for show listing and show detail.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use axum_extra::extract::{Query, QueryRejection};
use chrono::Utc;
use chrono_tz::Tz;
use setlist_core::dates::{tonight_window, weekend_window, DateRange};
use setlist_core::error::CoreError;
use setlist_core::pagination::PageRequest;
use setlist_core::types::{DbId, Timestamp};
use setlist_db::models::show::{ShowDetail, ShowListItem};
use setlist_db::repositories::ShowRepo;
use sqlx::PgPool;

use crate::converters::{into_page, into_window};
use crate::enrichment::{attach_genres, attach_lineups};
use crate::error::{AppResult, QueryContext};
use crate::filters::ShowFilter;
use crate::query::{page_request, ShowListParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

/// GET /api/shows
///
/// Dispatches on the resolved [`ShowFilter`]. The `tonight` and
/// `this-weekend` presets return every match and report its size as `total`.
pub async fn list_shows(
    State(state): State<AppState>,
    query: Result<Query<ShowListParams>, QueryRejection>,
) -> AppResult<impl IntoResponse> {
    let Query(params) = query?;
    let page = page_request(params.page.as_deref(), params.per_page.as_deref())?;
    let now = Utc::now();
    let filter = ShowFilter::resolve(&params, now, state.config.timezone)?;

    let (mut shows, total) =
        fetch_shows(&state.pool, &filter, page, now, state.config.timezone).await?;
    attach_lineups(&state.pool, &mut shows).await;

    tracing::debug!(?filter, count = shows.len(), total, "Listed shows");

    Ok(Json(DataResponse::paginated(shows, page, total)))
}

async fn fetch_shows(
    pool: &PgPool,
    filter: &ShowFilter,
    page: PageRequest,
    now: Timestamp,
    tz: Tz,
) -> AppResult<(Vec<ShowListItem>, i64)> {
    let (limit, offset) = (page.limit(), page.offset());

    let result = match filter {
        ShowFilter::Tonight => {
            let DateRange { from, to } = tonight_window(now, tz);
            into_window(
                ShowRepo::list_in_window(pool, from, to)
                    .await
                    .context("list shows tonight")?,
            )
        }
        ShowFilter::ThisWeekend => {
            let DateRange { from, to } = weekend_window(now, tz);
            into_window(
                ShowRepo::list_in_window(pool, from, to)
                    .await
                    .context("list shows this weekend")?,
            )
        }
        ShowFilter::Free => into_page(
            ShowRepo::list_free(pool, now, limit, offset)
                .await
                .context("list free shows")?,
        ),
        ShowFilter::Venues(slugs) => into_page(
            ShowRepo::list_by_venues(pool, now, slugs, limit, offset)
                .await
                .context("list shows by venue")?,
        ),
        ShowFilter::Regions(regions) => into_page(
            ShowRepo::list_by_regions(pool, now, regions, limit, offset)
                .await
                .context("list shows by region")?,
        ),
        ShowFilter::Genres(slugs) => {
            let rows = ShowRepo::list_by_genres(pool, now, slugs, limit, offset)
                .await
                .context("list shows by genre")?;
            let total = ShowRepo::count_by_genres(pool, now, slugs)
                .await
                .context("count shows by genre")?;
            (rows.into_iter().map(ShowListItem::from).collect(), total)
        }
        ShowFilter::DateRange(range) => into_page(
            ShowRepo::list_by_date_range(pool, range.from, range.to, limit, offset)
                .await
                .context("list shows by date range")?,
        ),
        ShowFilter::Upcoming => into_page(
            ShowRepo::list_upcoming(pool, now, limit, offset)
                .await
                .context("list upcoming shows")?,
        ),
    };

    Ok(result)
}

// ---------------------------------------------------------------------------
// Detail
// ---------------------------------------------------------------------------

/// GET /api/shows/{id}
pub async fn get_show(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let id = parse_id(&raw_id)?;

    let row = ShowRepo::find_detail(&state.pool, id)
        .await
        .context("get show")?
        .ok_or(CoreError::not_found("Show"))?;

    let mut bands = ShowRepo::lineup(&state.pool, id)
        .await
        .context("get show lineup")?;
    attach_genres(&state.pool, &mut bands).await;

    Ok(Json(DataResponse::new(ShowDetail::from_row(row, bands))))
}

/// Show ids arrive as raw path segments so a non-integer id yields an
/// `INVALID_PARAMETER` envelope instead of an extractor rejection.
fn parse_id(raw: &str) -> Result<DbId, CoreError> {
    raw.trim()
        .parse::<DbId>()
        .map_err(|_| CoreError::invalid_param("id", "must be a valid integer"))
}
