//! Repository for the `shows` and `show_bands` tables.
//!
//! Every list query selects [`SHOW_LIST_COLUMNS`] so all filter variants
//! decode into the same row shape. Paginated variants append
//! `COUNT(*) OVER()` as `total_count`.

use setlist_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::show::{
    BandForShow, CountedShowRow, CreateShow, CreatedShow, ShowBandRow, ShowDetailRow, ShowListRow,
};

/// Column list for show list queries (`s` = shows, `v` = venues).
const SHOW_LIST_COLUMNS: &str = "\
    s.id, s.title, s.image_url, s.date, s.doors_time, s.show_time, \
    s.price_min::float8 AS price_min, s.price_max::float8 AS price_max, \
    s.ticket_url, s.age_restriction, s.status, \
    v.id AS venue_id, v.name AS venue_name, v.slug AS venue_slug, \
    v.region AS venue_region, v.address AS venue_address, \
    v.image_url AS venue_image_url";

const SHOW_FROM: &str = "FROM shows s JOIN venues v ON v.id = s.venue_id";

const SHOW_ORDER: &str = "ORDER BY s.date, s.id";

/// Shows with at least one band tagged with any of the genre slugs in `$2`.
const GENRE_MATCH: &str = "\
    EXISTS (\
        SELECT 1 FROM show_bands sb \
        JOIN band_genres bg ON bg.band_id = sb.band_id \
        JOIN genres g ON g.id = bg.genre_id \
        WHERE sb.show_id = s.id AND g.slug = ANY($2))";

/// Build a paginated show list query. `filter` may reference `$1` (now) and
/// `$2`; the limit and offset are always the last two parameters.
fn counted_query(filter: &str, limit_param: u8) -> String {
    let offset_param = limit_param + 1;
    format!(
        "SELECT {SHOW_LIST_COLUMNS}, COUNT(*) OVER() AS total_count \
         {SHOW_FROM} WHERE {filter} {SHOW_ORDER} \
         LIMIT ${limit_param} OFFSET ${offset_param}"
    )
}

/// Provides the show list, detail and submission queries.
pub struct ShowRepo;

impl ShowRepo {
    // -----------------------------------------------------------------------
    // Date-window presets (unpaginated)
    // -----------------------------------------------------------------------

    /// Shows with `from <= date < to`.
    pub async fn list_in_window(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
    ) -> Result<Vec<ShowListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOW_LIST_COLUMNS} {SHOW_FROM} \
             WHERE s.date >= $1 AND s.date < $2 {SHOW_ORDER}"
        );
        sqlx::query_as::<_, ShowListRow>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Paginated filters
    // -----------------------------------------------------------------------

    /// Upcoming shows with no price set, or a price of zero.
    pub async fn list_free(
        pool: &PgPool,
        now: Timestamp,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedShowRow>, sqlx::Error> {
        let query = counted_query(
            "s.date >= $1 \
             AND COALESCE(s.price_min, 0) = 0 \
             AND COALESCE(s.price_max, 0) = 0",
            2,
        );
        sqlx::query_as::<_, CountedShowRow>(&query)
            .bind(now)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Upcoming shows at any of the given venue slugs.
    pub async fn list_by_venues(
        pool: &PgPool,
        now: Timestamp,
        venue_slugs: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedShowRow>, sqlx::Error> {
        let query = counted_query("s.date >= $1 AND v.slug = ANY($2)", 3);
        sqlx::query_as::<_, CountedShowRow>(&query)
            .bind(now)
            .bind(venue_slugs)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Upcoming shows at venues in any of the given regions.
    pub async fn list_by_regions(
        pool: &PgPool,
        now: Timestamp,
        regions: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedShowRow>, sqlx::Error> {
        let query = counted_query("s.date >= $1 AND v.region = ANY($2)", 3);
        sqlx::query_as::<_, CountedShowRow>(&query)
            .bind(now)
            .bind(regions)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of upcoming shows featuring a band in any of the given genres.
    ///
    /// The total comes from [`ShowRepo::count_by_genres`].
    pub async fn list_by_genres(
        pool: &PgPool,
        now: Timestamp,
        genre_slugs: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ShowListRow>, sqlx::Error> {
        let query = format!(
            "SELECT {SHOW_LIST_COLUMNS} {SHOW_FROM} \
             WHERE s.date >= $1 AND {GENRE_MATCH} {SHOW_ORDER} \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ShowListRow>(&query)
            .bind(now)
            .bind(genre_slugs)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count of upcoming shows matching [`ShowRepo::list_by_genres`].
    pub async fn count_by_genres(
        pool: &PgPool,
        now: Timestamp,
        genre_slugs: &[String],
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM shows s WHERE s.date >= $1 AND {GENRE_MATCH}");
        sqlx::query_scalar(&query)
            .bind(now)
            .bind(genre_slugs)
            .fetch_one(pool)
            .await
    }

    /// Shows with `from <= date <= to`.
    pub async fn list_by_date_range(
        pool: &PgPool,
        from: Timestamp,
        to: Timestamp,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedShowRow>, sqlx::Error> {
        let query = counted_query("s.date >= $1 AND s.date <= $2", 3);
        sqlx::query_as::<_, CountedShowRow>(&query)
            .bind(from)
            .bind(to)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// All shows from `now` onward.
    pub async fn list_upcoming(
        pool: &PgPool,
        now: Timestamp,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedShowRow>, sqlx::Error> {
        let query = counted_query("s.date >= $1", 2);
        sqlx::query_as::<_, CountedShowRow>(&query)
            .bind(now)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Detail and lineups
    // -----------------------------------------------------------------------

    /// A single show joined with its venue.
    pub async fn find_detail(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ShowDetailRow>, sqlx::Error> {
        sqlx::query_as::<_, ShowDetailRow>(
            "SELECT s.id, s.title, s.description, s.image_url, s.date, \
                    s.doors_time, s.show_time, \
                    s.price_min::float8 AS price_min, s.price_max::float8 AS price_max, \
                    s.ticket_url, s.age_restriction, s.status, \
                    v.id AS venue_id, v.name AS venue_name, v.slug AS venue_slug, \
                    v.address AS venue_address, v.region AS venue_region, \
                    v.website AS venue_website, v.image_url AS venue_image_url \
             FROM shows s JOIN venues v ON v.id = s.venue_id \
             WHERE s.id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Lineups for many shows in one round trip, ordered by show then
    /// performance order then band id.
    pub async fn bands_for_shows(
        pool: &PgPool,
        show_ids: &[DbId],
    ) -> Result<Vec<ShowBandRow>, sqlx::Error> {
        sqlx::query_as::<_, ShowBandRow>(
            "SELECT sb.show_id, b.id, b.name, b.slug, b.image_url, \
                    sb.is_headliner, sb.performance_order \
             FROM show_bands sb \
             JOIN bands b ON b.id = sb.band_id \
             WHERE sb.show_id = ANY($1) \
             ORDER BY sb.show_id, sb.performance_order, b.id",
        )
        .bind(show_ids)
        .fetch_all(pool)
        .await
    }

    /// The full lineup of one show. Genres are attached by the caller.
    pub async fn lineup(pool: &PgPool, show_id: DbId) -> Result<Vec<BandForShow>, sqlx::Error> {
        sqlx::query_as::<_, BandForShow>(
            "SELECT b.id, b.name, b.slug, b.bio, b.image_url, b.spotify_url, b.website, \
                    sb.is_headliner, sb.performance_order \
             FROM show_bands sb \
             JOIN bands b ON b.id = sb.band_id \
             WHERE sb.show_id = $1 \
             ORDER BY sb.performance_order, b.id",
        )
        .bind(show_id)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a show, returning its id, status and creation time.
    pub async fn create(pool: &PgPool, input: &CreateShow) -> Result<CreatedShow, sqlx::Error> {
        sqlx::query_as::<_, CreatedShow>(
            "INSERT INTO shows \
                (venue_id, title, image_url, date, doors_time, show_time, \
                 price_min, price_max, ticket_url, age_restriction, status, source) \
             VALUES ($1, $2, $3, $4, $5, $6, $7::numeric, $8::numeric, $9, $10, $11, $12) \
             RETURNING id, status, created_at",
        )
        .bind(input.venue_id)
        .bind(&input.title)
        .bind(&input.image_url)
        .bind(input.date)
        .bind(input.doors_time)
        .bind(input.show_time)
        .bind(input.price_min)
        .bind(input.price_max)
        .bind(&input.ticket_url)
        .bind(&input.age_restriction)
        .bind(&input.status)
        .bind(&input.source)
        .fetch_one(pool)
        .await
    }

    /// Add a band to a show's lineup.
    pub async fn link_band(
        pool: &PgPool,
        show_id: DbId,
        band_id: DbId,
        is_headliner: bool,
        performance_order: i32,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO show_bands (show_id, band_id, is_headliner, performance_order) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(show_id)
        .bind(band_id)
        .bind(is_headliner)
        .bind(performance_order)
        .execute(pool)
        .await?;
        Ok(())
    }
}
