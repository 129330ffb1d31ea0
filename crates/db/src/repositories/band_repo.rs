//! Repository for the `bands` table.
//!
//! Provides band listing (plain, full-text and genre-filtered), detail
//! lookups, similarity ranking and the find-or-create path used by show
//! submissions.

use setlist_core::slug::{slugify, suffixed, MAX_SLUG_SUFFIX};
use setlist_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::band::{
    BandDetail, BandListItem, BandRef, BandShowRow, CountedBandRow, SimilarBandItem,
};

/// Column list for band list queries (`b` = bands).
const BAND_LIST_COLUMNS: &str = "b.id, b.name, b.slug, b.bio, b.hometown, b.image_url";

/// Column list for band detail queries.
const BAND_DETAIL_COLUMNS: &str = "\
    id, name, slug, bio, hometown, image_url, website, spotify_url, \
    instagram, facebook, bandcamp_url";

/// Bands tagged with any of the genre slugs in `$1`.
const GENRE_MATCH: &str = "\
    EXISTS (\
        SELECT 1 FROM band_genres bg \
        JOIN genres g ON g.id = bg.genre_id \
        WHERE bg.band_id = b.id AND g.slug = ANY($1))";

pub struct BandRepo;

impl BandRepo {
    // -----------------------------------------------------------------------
    // Lists
    // -----------------------------------------------------------------------

    /// One page of all bands ordered by name.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedBandRow>, sqlx::Error> {
        let query = format!(
            "SELECT {BAND_LIST_COLUMNS}, COUNT(*) OVER() AS total_count \
             FROM bands b \
             ORDER BY b.name, b.id \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, CountedBandRow>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Full-text search over name, bio and hometown, best match first.
    pub async fn search(
        pool: &PgPool,
        q: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CountedBandRow>, sqlx::Error> {
        let query = format!(
            "SELECT {BAND_LIST_COLUMNS}, COUNT(*) OVER() AS total_count \
             FROM bands b, plainto_tsquery('english', $1) tsq \
             WHERE b.search_vector @@ tsq \
             ORDER BY ts_rank(b.search_vector, tsq) DESC, b.name, b.id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, CountedBandRow>(&query)
            .bind(q)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// One page of bands tagged with any of the given genres.
    ///
    /// The total comes from [`BandRepo::count_by_genres`].
    pub async fn list_by_genres(
        pool: &PgPool,
        genre_slugs: &[String],
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BandListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {BAND_LIST_COLUMNS} FROM bands b \
             WHERE {GENRE_MATCH} \
             ORDER BY b.name, b.id \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BandListItem>(&query)
            .bind(genre_slugs)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    pub async fn count_by_genres(
        pool: &PgPool,
        genre_slugs: &[String],
    ) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM bands b WHERE {GENRE_MATCH}");
        sqlx::query_scalar(&query)
            .bind(genre_slugs)
            .fetch_one(pool)
            .await
    }

    // -----------------------------------------------------------------------
    // Detail
    // -----------------------------------------------------------------------

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BandDetail>, sqlx::Error> {
        let query = format!("SELECT {BAND_DETAIL_COLUMNS} FROM bands WHERE slug = $1");
        sqlx::query_as::<_, BandDetail>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Every show from `now` onward that the band plays, with its venue.
    pub async fn upcoming_shows(
        pool: &PgPool,
        band_id: DbId,
        now: Timestamp,
    ) -> Result<Vec<BandShowRow>, sqlx::Error> {
        sqlx::query_as::<_, BandShowRow>(
            "SELECT s.id, s.date, sb.is_headliner, \
                    v.id AS venue_id, v.name AS venue_name, v.slug AS venue_slug, \
                    v.region AS venue_region, v.address AS venue_address, \
                    v.image_url AS venue_image_url \
             FROM show_bands sb \
             JOIN shows s ON s.id = sb.show_id \
             JOIN venues v ON v.id = s.venue_id \
             WHERE sb.band_id = $1 AND s.date >= $2 \
             ORDER BY s.date, s.id",
        )
        .bind(band_id)
        .bind(now)
        .fetch_all(pool)
        .await
    }

    /// Bands sharing at least one genre with `band_id`, most shared first.
    ///
    /// `shared_genres` is left empty for the caller to fill in.
    pub async fn similar(
        pool: &PgPool,
        band_id: DbId,
        limit: i64,
    ) -> Result<Vec<SimilarBandItem>, sqlx::Error> {
        sqlx::query_as::<_, SimilarBandItem>(
            "SELECT b.id, b.name, b.slug, b.image_url, COUNT(*) AS shared_genre_count \
             FROM band_genres src \
             JOIN band_genres other \
               ON other.genre_id = src.genre_id AND other.band_id <> src.band_id \
             JOIN bands b ON b.id = other.band_id \
             WHERE src.band_id = $1 \
             GROUP BY b.id \
             ORDER BY shared_genre_count DESC, b.name, b.id \
             LIMIT $2",
        )
        .bind(band_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    // -----------------------------------------------------------------------
    // Find-or-create
    // -----------------------------------------------------------------------

    /// Exact, case-sensitive name lookup. The oldest band wins if several
    /// share a name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<BandRef>, sqlx::Error> {
        sqlx::query_as::<_, BandRef>(
            "SELECT id, name, slug FROM bands WHERE name = $1 ORDER BY id LIMIT 1",
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Insert a band with a slug derived from its name.
    ///
    /// A taken slug is retried as `slug-2`, `slug-3`, ... up to
    /// [`MAX_SLUG_SUFFIX`]. Returns `None` if every candidate is taken.
    pub async fn create_with_unique_slug(
        pool: &PgPool,
        name: &str,
    ) -> Result<Option<BandRef>, sqlx::Error> {
        let base = slugify(name);

        for n in 1..=MAX_SLUG_SUFFIX {
            let slug = suffixed(&base, n);
            let created = sqlx::query_as::<_, BandRef>(
                "INSERT INTO bands (name, slug) VALUES ($1, $2) \
                 ON CONFLICT (slug) DO NOTHING \
                 RETURNING id, name, slug",
            )
            .bind(name)
            .bind(&slug)
            .fetch_optional(pool)
            .await?;

            if created.is_some() {
                return Ok(created);
            }
            tracing::debug!(%slug, "Band slug taken, trying next suffix");
        }

        Ok(None)
    }
}
