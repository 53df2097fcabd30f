//! Google Places reviews proxy.
//!
//! Keeps the Places API key server-side; the frontend asks this service for
//! a place's reviews instead of calling Google directly.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

const PLACES_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const PLACES_FIELDS: &str = "name,rating,reviews,user_ratings_total";
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Review summary returned to the frontend. Individual reviews are passed
/// through as Google returns them.
#[derive(Debug, Serialize)]
pub struct PlaceReviews {
    pub place_name: String,
    pub rating: f64,
    pub total_ratings: i64,
    pub reviews: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct PlacesResponse {
    status: String,
    error_message: Option<String>,
    result: Option<PlacesResult>,
}

#[derive(Debug, Deserialize)]
struct PlacesResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    user_ratings_total: i64,
    #[serde(default)]
    reviews: Vec<Value>,
}

#[derive(Clone)]
pub struct ReviewsClient {
    client: Client,
    /// Server-side Places API key (from ENV). A per-request override is
    /// still accepted for ad-hoc use.
    api_key: Option<String>,
}

impl ReviewsClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
        }
    }

    pub async fn fetch(&self, place_id: &str, api_key_override: Option<&str>) -> Result<PlaceReviews> {
        let api_key = api_key_override
            .or(self.api_key.as_deref())
            .ok_or_else(|| {
                AppError::BadRequest(
                    "Google Places API key is required. Set GOOGLE_PLACES_API_KEY or pass \
                     api_key parameter."
                        .into(),
                )
            })?;

        let response = self
            .client
            .get(PLACES_DETAILS_URL)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .query(&[
                ("place_id", place_id),
                ("fields", PLACES_FIELDS),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to fetch Google reviews");
                AppError::Internal("Failed to fetch reviews from Google Places API".into())
            })?;

        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "Google Places API HTTP error");
            return Err(AppError::Internal(
                "Failed to fetch reviews from Google Places API".into(),
            ));
        }

        let body: PlacesResponse = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse Google Places response");
            AppError::Internal("Failed to fetch reviews from Google Places API".into())
        })?;

        if body.status != "OK" {
            return Err(AppError::Upstream(format!(
                "Google Places API error: {} - {}",
                body.status,
                body.error_message.as_deref().unwrap_or("Unknown error")
            )));
        }

        let result = body.result.unwrap_or(PlacesResult {
            name: String::new(),
            rating: 0.0,
            user_ratings_total: 0,
            reviews: Vec::new(),
        });

        Ok(PlaceReviews {
            place_name: result.name,
            rating: result.rating,
            total_ratings: result.user_ratings_total,
            reviews: result.reviews,
        })
    }
}
