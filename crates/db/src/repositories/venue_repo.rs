//! Repository for the `venues` table.

use setlist_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::venue::{VenueDetail, VenueListItem, VenueShowItem};

/// Column list for venue list queries, including the derived upcoming count.
/// `$1` must be bound to the current time.
const VENUE_LIST_COLUMNS: &str = "\
    v.id, v.name, v.slug, v.address, v.region, v.capacity, v.website, v.image_url, \
    (SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.date >= $1) \
        AS upcoming_show_count";

/// Column list for venue detail queries.
const VENUE_DETAIL_COLUMNS: &str = "\
    id, name, slug, address, city, state, zip_code, region, capacity, \
    website, phone, image_url";

pub struct VenueRepo;

impl VenueRepo {
    /// All venues ordered by name.
    pub async fn list(pool: &PgPool, now: Timestamp) -> Result<Vec<VenueListItem>, sqlx::Error> {
        let query = format!("SELECT {VENUE_LIST_COLUMNS} FROM venues v ORDER BY v.name, v.id");
        sqlx::query_as::<_, VenueListItem>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Venues in any of the given regions, ordered by name.
    pub async fn list_by_regions(
        pool: &PgPool,
        now: Timestamp,
        regions: &[String],
    ) -> Result<Vec<VenueListItem>, sqlx::Error> {
        let query = format!(
            "SELECT {VENUE_LIST_COLUMNS} FROM venues v \
             WHERE v.region = ANY($2) \
             ORDER BY v.name, v.id"
        );
        sqlx::query_as::<_, VenueListItem>(&query)
            .bind(now)
            .bind(regions)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<VenueDetail>, sqlx::Error> {
        let query = format!("SELECT {VENUE_DETAIL_COLUMNS} FROM venues WHERE slug = $1");
        sqlx::query_as::<_, VenueDetail>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM venues WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// The next `limit` shows at a venue. Lineups are attached by the caller.
    pub async fn upcoming_shows(
        pool: &PgPool,
        venue_id: DbId,
        now: Timestamp,
        limit: i64,
    ) -> Result<Vec<VenueShowItem>, sqlx::Error> {
        sqlx::query_as::<_, VenueShowItem>(
            "SELECT id, title, date, \
                    price_min::float8 AS price_min, price_max::float8 AS price_max \
             FROM shows \
             WHERE venue_id = $1 AND date >= $2 \
             ORDER BY date, id \
             LIMIT $3",
        )
        .bind(venue_id)
        .bind(now)
        .bind(limit)
        .fetch_all(pool)
        .await
    }
}
