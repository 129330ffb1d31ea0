//! Query parameter types for API handlers.
//!
//! Numeric parameters are kept as raw strings so that malformed values
//! produce an `INVALID_PARAMETER` envelope naming the parameter rather than
//! a generic extractor rejection. Multi-valued filters are extracted with
//! `axum_extra::extract::Query`, which collects repeated keys
//! (`?venue=a&venue=b`) into a `Vec`.

use serde::Deserialize;
use setlist_core::error::CoreError;
use setlist_core::pagination::PageRequest;

/// `GET /api/shows`.
#[derive(Debug, Default, Deserialize)]
pub struct ShowListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub filter: Option<String>,
    #[serde(default)]
    pub venue: Vec<String>,
    #[serde(default)]
    pub region: Vec<String>,
    #[serde(default)]
    pub genre: Vec<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// `GET /api/bands`.
#[derive(Debug, Default, Deserialize)]
pub struct BandListParams {
    pub page: Option<String>,
    pub per_page: Option<String>,
    pub q: Option<String>,
    #[serde(default)]
    pub genre: Vec<String>,
}

/// `GET /api/venues`.
#[derive(Debug, Default, Deserialize)]
pub struct VenueListParams {
    #[serde(default)]
    pub region: Vec<String>,
}

/// `?limit=` on the ranked, unpaginated endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

/// `GET /api/search`.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub limit: Option<String>,
}

/// Resolve raw `page` / `per_page` values.
pub fn page_request(page: Option<&str>, per_page: Option<&str>) -> Result<PageRequest, CoreError> {
    PageRequest::resolve(page, per_page)
}

/// Trim each value and drop blanks (`?venue=&venue=x` is just `x`).
pub fn non_blank(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}
