//! Venue models and the venue projections embedded in show/band responses.

use serde::Serialize;
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::show::BandBasic;

/// Minimal venue info embedded in show lists and band schedules.
///
/// Optional fields are omitted from the JSON when absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueBasic {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Venue projection in a show detail response.
#[derive(Debug, Clone, Serialize)]
pub struct VenueForShow {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub region: Option<String>,
    pub website: Option<String>,
    pub image_url: Option<String>,
}

/// A row of `GET /api/venues`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueListItem {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub region: Option<String>,
    pub capacity: Option<i32>,
    pub website: Option<String>,
    pub image_url: Option<String>,
    pub upcoming_show_count: i64,
}

/// `GET /api/venues/{slug}`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueDetail {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub region: Option<String>,
    pub capacity: Option<i32>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
    #[sqlx(skip)]
    pub upcoming_shows: Vec<VenueShowItem>,
}

/// An upcoming show embedded in a venue detail response.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueShowItem {
    pub id: DbId,
    pub title: Option<String>,
    pub date: Timestamp,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    #[sqlx(skip)]
    pub bands: Vec<BandBasic>,
}

/// Id/name/slug triple used by search results.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VenueRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}
