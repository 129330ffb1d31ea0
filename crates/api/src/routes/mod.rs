pub mod bands;
pub mod genres;
pub mod health;
pub mod search;
pub mod shows;
pub mod venues;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /shows                     list (GET), submit (POST)
/// /shows/{id}                detail
///
/// /venues                    list, optionally by region
/// /venues/{slug}             detail with upcoming shows
///
/// /bands                     list, search, filter by genre
/// /bands/{slug}              detail with genres and upcoming shows
/// /bands/{slug}/similar      bands sharing genres
///
/// /genres                    list with show counts
///
/// /search                    shows, bands and venues matching `q`
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/shows", shows::router())
        .nest("/venues", venues::router())
        .nest("/bands", bands::router())
        .nest("/genres", genres::router())
        .nest("/search", search::router())
}
