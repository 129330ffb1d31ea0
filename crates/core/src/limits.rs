//! `limit` parameters for the unpaginated ranked endpoints.
//!
//! These clamp at the maximum instead of rejecting, but still reject
//! anything that is not a positive integer.

use crate::error::CoreError;
use crate::pagination::{non_empty, parse_positive};

/// Default number of similar bands returned.
pub const DEFAULT_SIMILAR_BANDS_LIMIT: i64 = 10;

/// Maximum number of similar bands returned.
pub const MAX_SIMILAR_BANDS_LIMIT: i64 = 50;

/// Default number of results per category in global search.
pub const DEFAULT_SEARCH_LIMIT: i64 = 20;

/// Maximum number of results per category in global search.
pub const MAX_SEARCH_LIMIT: i64 = 50;

/// Upcoming shows embedded in a venue detail response.
pub const VENUE_UPCOMING_SHOWS_LIMIT: i64 = 50;

/// Parse an optional `limit`, falling back to `default` and clamping to `max`.
pub fn parse_limit(raw: Option<&str>, default: i64, max: i64) -> Result<i64, CoreError> {
    match non_empty(raw) {
        None => Ok(default),
        Some(raw) => parse_positive(raw)
            .map(|n| n.min(max))
            .ok_or_else(|| CoreError::invalid_param("limit", "must be a positive integer")),
    }
}
