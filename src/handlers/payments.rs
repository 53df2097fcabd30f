use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::models::CreatePayment;

fn default_currency() -> String {
    "gbp".to_string()
}

fn default_description() -> String {
    "Service Payment".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateIntentRequest {
    #[serde(default)]
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_description")]
    pub description: String,
    #[serde(default)]
    pub customer_email: String,
    #[serde(default)]
    pub customer_name: String,
    pub lead_id: Option<i64>,
}

/// Convert a major-unit amount (pounds) to minor units (pence).
///
/// Rounds instead of truncating: 49.99 has no exact f64 representation and
/// can arrive as 4998.999..., which truncation would turn into an
/// off-by-one-penny charge.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

/// POST /payments/create-intent/
///
/// Creates a Stripe payment intent and records a pending payment row keyed
/// by the intent id. The client secret goes back to the browser; the status
/// transition happens later via webhook.
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(input): Json<CreateIntentRequest>,
) -> Result<(StatusCode, Json<Value>)> {
    let Some(stripe) = state.stripe.as_ref() else {
        tracing::error!("STRIPE_SECRET_KEY is not configured");
        return Err(AppError::BadRequest(
            "Payment processing is not configured. Please contact support.".into(),
        ));
    };

    let amount_minor = to_minor_units(input.amount);
    if amount_minor <= 0 {
        tracing::warn!(amount = input.amount, "Invalid amount received");
        return Err(AppError::BadRequest("Invalid amount".into()));
    }

    let currency = input.currency.trim().to_lowercase();

    tracing::debug!(
        amount_minor,
        currency = %currency,
        "Creating Stripe payment intent"
    );
    let intent = stripe
        .create_payment_intent(
            amount_minor,
            &currency,
            &input.description,
            &input.customer_email,
            &input.customer_name,
            input.lead_id,
        )
        .await?;

    let payment = {
        let conn = state.db.get()?;
        queries::create_payment(
            &conn,
            &CreatePayment {
                lead_id: input.lead_id,
                stripe_payment_intent_id: intent.id.clone(),
                amount_minor,
                currency,
                description: input.description.clone(),
                customer_email: input.customer_email.clone(),
                customer_name: input.customer_name.clone(),
            },
        )?
    };

    tracing::info!(
        intent_id = %intent.id,
        payment_id = payment.id,
        "Payment intent created"
    );
    if let Some(lead_id) = input.lead_id {
        // Confirmation email is deferred to the payment_intent.succeeded webhook.
        tracing::info!(
            lead_id,
            "Payment intent created for lead. Email will be sent after payment is successful."
        );
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "client_secret": intent.client_secret,
            "payment_id": payment.id,
        })),
    ))
}
