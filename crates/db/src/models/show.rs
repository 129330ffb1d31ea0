//! Show models, lineup rows and the submission DTO.

use chrono::NaiveTime;
use serde::Serialize;
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::genre::GenreBasic;
use crate::models::venue::{VenueBasic, VenueForShow};

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One show joined with its venue, as selected by every show list query.
///
/// Venue columns are flattened with a `venue_` prefix.
#[derive(Debug, Clone, FromRow)]
pub struct ShowListRow {
    pub id: DbId,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub date: Timestamp,
    pub doors_time: Option<NaiveTime>,
    pub show_time: Option<NaiveTime>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ticket_url: Option<String>,
    pub age_restriction: Option<String>,
    pub status: String,
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_slug: String,
    pub venue_region: Option<String>,
    pub venue_address: Option<String>,
    pub venue_image_url: Option<String>,
}

/// A [`ShowListRow`] carrying the `COUNT(*) OVER()` total of its query.
#[derive(Debug, Clone, FromRow)]
pub struct CountedShowRow {
    #[sqlx(flatten)]
    pub show: ShowListRow,
    pub total_count: i64,
}

/// One show with the venue columns needed for the detail view.
#[derive(Debug, Clone, FromRow)]
pub struct ShowDetailRow {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Timestamp,
    pub doors_time: Option<NaiveTime>,
    pub show_time: Option<NaiveTime>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ticket_url: Option<String>,
    pub age_restriction: Option<String>,
    pub status: String,
    pub venue_id: DbId,
    pub venue_name: String,
    pub venue_slug: String,
    pub venue_address: Option<String>,
    pub venue_region: Option<String>,
    pub venue_website: Option<String>,
    pub venue_image_url: Option<String>,
}

/// A band appearing on a show, as returned by the batched lineup lookup.
#[derive(Debug, Clone, FromRow)]
pub struct ShowBandRow {
    pub show_id: DbId,
    #[sqlx(flatten)]
    pub band: BandBasic,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Minimal band info on a show lineup.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BandBasic {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_headliner: bool,
    pub performance_order: i32,
}

/// A show in list responses.
#[derive(Debug, Clone, Serialize)]
pub struct ShowListItem {
    pub id: DbId,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub date: Timestamp,
    pub doors_time: Option<NaiveTime>,
    pub show_time: Option<NaiveTime>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ticket_url: Option<String>,
    pub age_restriction: Option<String>,
    pub status: String,
    pub venue: VenueBasic,
    pub bands: Vec<BandBasic>,
}

impl From<ShowListRow> for ShowListItem {
    fn from(row: ShowListRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            image_url: row.image_url,
            date: row.date,
            doors_time: row.doors_time,
            show_time: row.show_time,
            price_min: row.price_min,
            price_max: row.price_max,
            ticket_url: row.ticket_url,
            age_restriction: row.age_restriction,
            status: row.status,
            venue: VenueBasic {
                id: row.venue_id,
                name: row.venue_name,
                slug: row.venue_slug,
                region: row.venue_region,
                address: row.venue_address,
                image_url: row.venue_image_url,
            },
            bands: Vec::new(),
        }
    }
}

/// A band on a show detail lineup, with its genres.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BandForShow {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub spotify_url: Option<String>,
    pub website: Option<String>,
    pub is_headliner: bool,
    pub performance_order: i32,
    #[sqlx(skip)]
    pub genres: Vec<GenreBasic>,
}

/// `GET /api/shows/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct ShowDetail {
    pub id: DbId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub date: Timestamp,
    pub doors_time: Option<NaiveTime>,
    pub show_time: Option<NaiveTime>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ticket_url: Option<String>,
    pub age_restriction: Option<String>,
    pub status: String,
    pub venue: VenueForShow,
    pub bands: Vec<BandForShow>,
}

impl ShowDetail {
    pub fn from_row(row: ShowDetailRow, bands: Vec<BandForShow>) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            image_url: row.image_url,
            date: row.date,
            doors_time: row.doors_time,
            show_time: row.show_time,
            price_min: row.price_min,
            price_max: row.price_max,
            ticket_url: row.ticket_url,
            age_restriction: row.age_restriction,
            status: row.status,
            venue: VenueForShow {
                id: row.venue_id,
                name: row.venue_name,
                slug: row.venue_slug,
                address: row.venue_address,
                region: row.venue_region,
                website: row.venue_website,
                image_url: row.venue_image_url,
            },
            bands,
        }
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Insert parameters for a new show. Validation happens before this is built.
#[derive(Debug, Clone)]
pub struct CreateShow {
    pub venue_id: DbId,
    pub title: Option<String>,
    pub image_url: Option<String>,
    pub date: Timestamp,
    pub doors_time: Option<NaiveTime>,
    pub show_time: Option<NaiveTime>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub ticket_url: Option<String>,
    pub age_restriction: Option<String>,
    pub status: String,
    pub source: String,
}

/// Returned by `POST /api/shows`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CreatedShow {
    pub id: DbId,
    pub status: String,
    pub created_at: Timestamp,
}
