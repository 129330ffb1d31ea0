//! Repository for the `genres` and `band_genres` tables.

use setlist_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{BandGenreRow, GenreBasic, GenreListItem};

pub struct GenreRepo;

impl GenreRepo {
    /// All genres ordered by name, each with the number of distinct shows
    /// featuring a band tagged with it.
    pub async fn list_with_show_counts(pool: &PgPool) -> Result<Vec<GenreListItem>, sqlx::Error> {
        sqlx::query_as::<_, GenreListItem>(
            "SELECT g.id, g.name, g.slug, g.description, \
                    (SELECT COUNT(DISTINCT sb.show_id) \
                     FROM band_genres bg \
                     JOIN show_bands sb ON sb.band_id = bg.band_id \
                     WHERE bg.genre_id = g.id) AS show_count \
             FROM genres g \
             ORDER BY g.name, g.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Genres of a single band, ordered by name.
    pub async fn for_band(pool: &PgPool, band_id: DbId) -> Result<Vec<GenreBasic>, sqlx::Error> {
        sqlx::query_as::<_, GenreBasic>(
            "SELECT g.id, g.name, g.slug \
             FROM band_genres bg \
             JOIN genres g ON g.id = bg.genre_id \
             WHERE bg.band_id = $1 \
             ORDER BY g.name, g.id",
        )
        .bind(band_id)
        .fetch_all(pool)
        .await
    }

    /// Genres of many bands in one round trip, ordered by band then name.
    pub async fn for_bands(
        pool: &PgPool,
        band_ids: &[DbId],
    ) -> Result<Vec<BandGenreRow>, sqlx::Error> {
        sqlx::query_as::<_, BandGenreRow>(
            "SELECT bg.band_id, g.id, g.name, g.slug \
             FROM band_genres bg \
             JOIN genres g ON g.id = bg.genre_id \
             WHERE bg.band_id = ANY($1) \
             ORDER BY bg.band_id, g.name, g.id",
        )
        .bind(band_ids)
        .fetch_all(pool)
        .await
    }
}
