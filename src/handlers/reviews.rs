use axum::extract::State;
use serde::Deserialize;

use crate::db::AppState;
use crate::error::{AppError, Result};
use crate::extractors::{Json, Query};
use crate::reviews::PlaceReviews;

#[derive(Debug, Deserialize)]
pub struct ReviewsQuery {
    #[serde(default)]
    pub place_id: String,
    pub api_key: Option<String>,
}

/// GET /google-reviews/
pub async fn google_reviews(
    State(state): State<AppState>,
    Query(query): Query<ReviewsQuery>,
) -> Result<Json<PlaceReviews>> {
    if query.place_id.is_empty() {
        return Err(AppError::BadRequest("place_id parameter is required".into()));
    }

    let reviews = state
        .reviews
        .fetch(&query.place_id, query.api_key.as_deref())
        .await?;

    Ok(Json(reviews))
}
