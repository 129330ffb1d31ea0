//! Route definitions for bands.

use axum::routing::get;
use axum::Router;

use crate::handlers::bands;
use crate::state::AppState;

/// Band routes mounted at `/bands`.
///
/// ```text
/// GET    /                  -> list_bands
/// GET    /{slug}            -> get_band
/// GET    /{slug}/similar    -> similar_bands
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bands::list_bands))
        .route("/{slug}", get(bands::get_band))
        .route("/{slug}/similar", get(bands::similar_bands))
}
