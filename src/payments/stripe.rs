use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::error::{AppError, Result};

type HmacSha256 = Hmac<Sha256>;

/// A freshly created payment intent. `client_secret` goes back to the
/// browser so Stripe.js can collect the card.
#[derive(Debug, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    pub client_secret: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: String,
}

#[derive(Debug, Clone)]
pub struct StripeClient {
    client: Client,
    secret_key: String,
    webhook_secret: String,
}

impl StripeClient {
    pub fn new(secret_key: String, webhook_secret: String) -> Self {
        Self {
            client: Client::new(),
            secret_key,
            webhook_secret,
        }
    }

    /// Create a payment intent for a one-off charge.
    ///
    /// `amount_minor` is in the currency's minor unit (pence for GBP).
    /// Customer context rides in the metadata so payments can be traced back
    /// to their lead from the Stripe dashboard.
    pub async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        description: &str,
        customer_email: &str,
        customer_name: &str,
        lead_id: Option<i64>,
    ) -> Result<PaymentIntent> {
        let amount = amount_minor.to_string();
        let lead_id = lead_id.map(|id| id.to_string()).unwrap_or_default();

        let response = self
            .client
            .post("https://api.stripe.com/v1/payment_intents")
            .basic_auth(&self.secret_key, None::<&str>)
            .form(&[
                ("amount", amount.as_str()),
                ("currency", currency),
                ("description", description),
                ("receipt_email", customer_email),
                ("metadata[customer_name]", customer_name),
                ("metadata[lead_id]", lead_id.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Internal(format!("Stripe API error: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            // Surface Stripe's own message (card declined, bad currency)
            // rather than the raw JSON envelope.
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or(body);
            return Err(AppError::Upstream(message));
        }

        let intent: PaymentIntent = response
            .json()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to parse Stripe response: {}", e)))?;

        Ok(intent)
    }

    /// Maximum age of a webhook timestamp before it's rejected (in seconds).
    /// Stripe recommends 300 seconds (5 minutes).
    const WEBHOOK_TIMESTAMP_TOLERANCE_SECS: i64 = 300;

    pub fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> Result<bool> {
        // Stripe signature format: t=timestamp,v1=signature
        let parts: Vec<&str> = signature.split(',').collect();

        let mut timestamp = None;
        let mut sig_v1 = None;

        for part in parts {
            if let Some(t) = part.strip_prefix("t=") {
                timestamp = Some(t);
            } else if let Some(s) = part.strip_prefix("v1=") {
                sig_v1 = Some(s);
            }
        }

        let timestamp_str =
            timestamp.ok_or_else(|| AppError::BadRequest("Invalid signature format".into()))?;
        let sig_v1 =
            sig_v1.ok_or_else(|| AppError::BadRequest("Invalid signature format".into()))?;

        // Parse and validate timestamp to prevent replay attacks.
        // Reject webhooks older than WEBHOOK_TIMESTAMP_TOLERANCE_SECS.
        let timestamp: i64 = timestamp_str
            .parse()
            .map_err(|_| AppError::BadRequest("Invalid timestamp in signature".into()))?;

        let now = chrono::Utc::now().timestamp();
        let age = now - timestamp;

        if age > Self::WEBHOOK_TIMESTAMP_TOLERANCE_SECS {
            tracing::warn!(
                "Stripe webhook rejected: timestamp too old (age={}s, max={}s)",
                age,
                Self::WEBHOOK_TIMESTAMP_TOLERANCE_SECS
            );
            return Ok(false);
        }

        // Also reject timestamps from the future (clock skew tolerance: 60 seconds)
        if age < -60 {
            tracing::warn!(
                "Stripe webhook rejected: timestamp in the future (age={}s)",
                age
            );
            return Ok(false);
        }

        // Construct signed payload
        let signed_payload = format!("{}.{}", timestamp_str, String::from_utf8_lossy(payload));

        // Compute expected signature
        let mut mac = HmacSha256::new_from_slice(self.webhook_secret.as_bytes())
            .map_err(|_| AppError::Internal("Invalid webhook secret".into()))?;
        mac.update(signed_payload.as_bytes());
        let expected = hex::encode(mac.finalize().into_bytes());

        // Use constant-time comparison to prevent timing attacks.
        // An attacker could otherwise measure response times to progressively
        // discover the correct signature byte-by-byte.
        let expected_bytes = expected.as_bytes();
        let provided_bytes = sig_v1.as_bytes();

        // Length check is not constant-time, but that's fine - signature length
        // is not secret (it's always 64 hex chars for SHA-256)
        if expected_bytes.len() != provided_bytes.len() {
            return Ok(false);
        }

        Ok(expected_bytes.ct_eq(provided_bytes).into())
    }
}

/// Generic Stripe webhook event - object is parsed based on event_type
#[derive(Debug, Deserialize)]
pub struct StripeWebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: StripeEventData,
}

#[derive(Debug, Deserialize)]
pub struct StripeEventData {
    pub object: serde_json::Value,
}

/// The payment_intent object inside payment_intent.* events. Only the
/// fields we act on are modeled.
#[derive(Debug, Deserialize)]
pub struct StripePaymentIntentObject {
    pub id: String,
    pub customer: Option<String>,
}
