//! Route definitions for shows.
//!
//! Mounted at `/shows` in the API route tree.

use axum::routing::get;
use axum::Router;

use crate::handlers::{shows, submissions};
use crate::state::AppState;

/// Show routes mounted at `/shows`.
///
/// ```text
/// GET    /          -> list_shows
/// POST   /          -> create_show
/// GET    /{id}      -> get_show
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(shows::list_shows).post(submissions::create_show))
        .route("/{id}", get(shows::get_show))
}
