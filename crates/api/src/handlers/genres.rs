use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use setlist_db::repositories::GenreRepo;

use crate::error::{AppResult, QueryContext};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/genres
///
/// Every genre by name with the number of shows featuring a band tagged
/// with it.
pub async fn list_genres(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let genres = GenreRepo::list_with_show_counts(&state.pool)
        .await
        .context("list genres")?;

    Ok(Json(DataResponse::new(genres)))
}
