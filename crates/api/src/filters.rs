//! Filter-strategy selection for the show and band list endpoints.
//!
//! Each list endpoint resolves its query parameters into exactly one
//! variant up front; the handler then dispatches on the variant.

use chrono_tz::Tz;
use setlist_core::dates::DateRange;
use setlist_core::error::CoreError;
use setlist_core::types::Timestamp;

use crate::query::{non_blank, BandListParams, ShowListParams};

pub const FILTER_TONIGHT: &str = "tonight";
pub const FILTER_THIS_WEEKEND: &str = "this-weekend";
pub const FILTER_FREE: &str = "free";

/// Strategy for `GET /api/shows`, in priority order.
#[derive(Debug, Clone, PartialEq)]
pub enum ShowFilter {
    Tonight,
    ThisWeekend,
    Free,
    Venues(Vec<String>),
    Regions(Vec<String>),
    Genres(Vec<String>),
    DateRange(DateRange),
    Upcoming,
}

impl ShowFilter {
    /// Pick the first applicable strategy.
    ///
    /// An unrecognised `filter` value is ignored. Date bounds are only
    /// parsed (and can only fail) when no earlier strategy applies.
    pub fn resolve(params: &ShowListParams, now: Timestamp, tz: Tz) -> Result<Self, CoreError> {
        match params.filter.as_deref().map(str::trim) {
            Some(FILTER_TONIGHT) => return Ok(Self::Tonight),
            Some(FILTER_THIS_WEEKEND) => return Ok(Self::ThisWeekend),
            Some(FILTER_FREE) => return Ok(Self::Free),
            _ => {}
        }

        let venues = non_blank(&params.venue);
        if !venues.is_empty() {
            return Ok(Self::Venues(venues));
        }

        let regions = non_blank(&params.region);
        if !regions.is_empty() {
            return Ok(Self::Regions(regions));
        }

        let genres = non_blank(&params.genre);
        if !genres.is_empty() {
            return Ok(Self::Genres(genres));
        }

        let date_from = non_empty(params.date_from.as_deref());
        let date_to = non_empty(params.date_to.as_deref());
        if date_from.is_some() || date_to.is_some() {
            return DateRange::resolve(date_from, date_to, now, tz).map(Self::DateRange);
        }

        Ok(Self::Upcoming)
    }
}

/// Strategy for `GET /api/bands`, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BandFilter {
    Search(String),
    Genres(Vec<String>),
    All,
}

impl BandFilter {
    pub fn resolve(params: &BandListParams) -> Self {
        if let Some(q) = non_empty(params.q.as_deref()) {
            return Self::Search(q.to_string());
        }

        let genres = non_blank(&params.genre);
        if !genres.is_empty() {
            return Self::Genres(genres);
        }

        Self::All
    }
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
