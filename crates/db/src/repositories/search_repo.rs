//! Full-text queries backing `GET /api/search`.
//!
//! Each query parses its input with `plainto_tsquery('english', ...)`, so
//! user input never needs escaping. Results are ranked with `ts_rank`.

use setlist_core::types::Timestamp;
use sqlx::PgPool;

use crate::models::band::BandRef;
use crate::models::search::SearchShowItem;
use crate::models::venue::VenueRef;

pub struct SearchRepo;

impl SearchRepo {
    /// Upcoming shows whose title or description, venue name or any
    /// linked band name matches.
    pub async fn shows(
        pool: &PgPool,
        q: &str,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<SearchShowItem>, sqlx::Error> {
        sqlx::query_as::<_, SearchShowItem>(
            "SELECT s.id, s.title, s.date, v.name AS venue_name \
             FROM shows s \
             JOIN venues v ON v.id = s.venue_id, \
             plainto_tsquery('english', $1) tsq \
             WHERE s.date >= $2 \
               AND (s.search_vector @@ tsq \
                    OR to_tsvector('english', v.name) @@ tsq \
                    OR EXISTS (\
                        SELECT 1 FROM show_bands sb \
                        JOIN bands b ON b.id = sb.band_id \
                        WHERE sb.show_id = s.id \
                          AND to_tsvector('english', b.name) @@ tsq)) \
             ORDER BY ts_rank(s.search_vector, tsq) DESC, s.date, s.id \
             LIMIT $3",
        )
        .bind(q)
        .bind(now)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Bands matching on name, bio or hometown.
    pub async fn bands(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<BandRef>, sqlx::Error> {
        sqlx::query_as::<_, BandRef>(
            "SELECT b.id, b.name, b.slug \
             FROM bands b, plainto_tsquery('english', $1) tsq \
             WHERE b.search_vector @@ tsq \
             ORDER BY ts_rank(b.search_vector, tsq) DESC, b.name, b.id \
             LIMIT $2",
        )
        .bind(q)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Venues matching on name, address, city or region.
    pub async fn venues(pool: &PgPool, q: &str, limit: i64) -> Result<Vec<VenueRef>, sqlx::Error> {
        sqlx::query_as::<_, VenueRef>(
            "SELECT v.id, v.name, v.slug \
             FROM venues v, plainto_tsquery('english', $1) tsq \
             WHERE v.search_vector @@ tsq \
             ORDER BY ts_rank(v.search_vector, tsq) DESC, v.name, v.id \
             LIMIT $2",
        )
        .bind(q)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
