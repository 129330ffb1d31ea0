//! Genre models.

use serde::Serialize;
use setlist_core::types::DbId;
use sqlx::FromRow;

/// Minimal genre info embedded in band responses.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct GenreBasic {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// A genre tagged on a band, as returned by the batched genre lookup.
#[derive(Debug, Clone, FromRow)]
pub struct BandGenreRow {
    pub band_id: DbId,
    #[sqlx(flatten)]
    pub genre: GenreBasic,
}

/// A row of `GET /api/genres`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct GenreListItem {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    /// Distinct shows featuring at least one band tagged with this genre.
    pub show_count: i64,
}
