//! Band models.

use serde::Serialize;
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::genre::GenreBasic;
use crate::models::venue::VenueBasic;

/// A row of `GET /api/bands`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BandListItem {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub hometown: Option<String>,
    pub image_url: Option<String>,
    #[sqlx(skip)]
    pub genres: Vec<GenreBasic>,
}

/// A [`BandListItem`] carrying the `COUNT(*) OVER()` total of its query.
#[derive(Debug, Clone, FromRow)]
pub struct CountedBandRow {
    #[sqlx(flatten)]
    pub band: BandListItem,
    pub total_count: i64,
}

/// `GET /api/bands/{slug}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BandDetail {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub hometown: Option<String>,
    pub image_url: Option<String>,
    pub website: Option<String>,
    pub spotify_url: Option<String>,
    pub instagram: Option<String>,
    pub facebook: Option<String>,
    pub bandcamp_url: Option<String>,
    #[sqlx(skip)]
    pub genres: Vec<GenreBasic>,
    #[sqlx(skip)]
    pub upcoming_shows: Vec<BandShowItem>,
}

/// One future appearance of a band, joined with its venue.
#[derive(Debug, Clone, FromRow)]
pub struct BandShowRow {
    pub id: DbId,
    pub date: Timestamp,
    pub is_headliner: bool,
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_slug: String,
    pub venue_region: Option<String>,
    pub venue_address: Option<String>,
    pub venue_image_url: Option<String>,
}

/// An upcoming show embedded in a band detail response.
#[derive(Debug, Clone, Serialize)]
pub struct BandShowItem {
    pub id: DbId,
    pub date: Timestamp,
    pub venue: VenueBasic,
    pub is_headliner: bool,
}

impl From<BandShowRow> for BandShowItem {
    fn from(row: BandShowRow) -> Self {
        Self {
            id: row.id,
            date: row.date,
            venue: VenueBasic {
                id: row.venue_id,
                name: row.venue_name,
                slug: row.venue_slug,
                region: row.venue_region,
                address: row.venue_address,
                image_url: row.venue_image_url,
            },
            is_headliner: row.is_headliner,
        }
    }
}

/// A band sharing at least one genre with another band.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SimilarBandItem {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub image_url: Option<String>,
    pub shared_genre_count: i64,
    #[sqlx(skip)]
    pub shared_genres: Vec<GenreBasic>,
}

/// Id/name/slug triple used by find-or-create and search results.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct BandRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}
