//! Route definitions for venues.

use axum::routing::get;
use axum::Router;

use crate::handlers::venues;
use crate::state::AppState;

/// Venue routes mounted at `/venues`.
///
/// ```text
/// GET    /          -> list_venues
/// GET    /{slug}    -> get_venue
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(venues::list_venues))
        .route("/{slug}", get(venues::get_venue))
}
