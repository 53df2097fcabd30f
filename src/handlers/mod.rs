mod jobs;
mod leads;
mod payments;
mod reviews;
mod webhook;

use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;

use crate::db::AppState;
use crate::extractors::Json;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/leads/", post(leads::submit_lead))
        .route("/payments/create-intent/", post(payments::create_payment_intent))
        .route("/payments/webhook/", post(webhook::stripe_webhook))
        .route("/google-reviews/", get(reviews::google_reviews))
        .route("/job-application/", post(jobs::submit_job_application))
}
