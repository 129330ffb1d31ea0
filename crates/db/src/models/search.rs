//! Global search result shapes.

use serde::Serialize;
use setlist_core::types::{DbId, Timestamp};
use sqlx::FromRow;

use crate::models::band::BandRef;
use crate::models::venue::VenueRef;

/// A show matching a search query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchShowItem {
    pub id: DbId,
    pub title: Option<String>,
    pub date: Timestamp,
    pub venue_name: String,
}

/// `GET /api/search`. All three arrays are always present.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub shows: Vec<SearchShowItem>,
    pub bands: Vec<BandRef>,
    pub venues: Vec<VenueRef>,
}
