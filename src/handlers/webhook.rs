use axum::{body::Bytes, extract::State, http::HeaderMap};
use serde_json::{json, Value};

use crate::classify::AppointmentDetails;
use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::models::{Lead, Payment};
use crate::payments::{StripePaymentIntentObject, StripeWebhookEvent};
use crate::templates::PaymentSummary;

/// Rebuild the appointment details a confirmation email needs from the
/// payment row. The description was written as "title - duration" at intent
/// creation; the price shown is what was actually charged.
fn appointment_from_payment(payment: &Payment) -> AppointmentDetails {
    let (title, duration) = match payment.description.split_once(" - ") {
        Some((title, rest)) => {
            let duration = rest.split(" - ").next().unwrap_or("N/A");
            (title.to_string(), duration.to_string())
        }
        None => (payment.description.clone(), "N/A".to_string()),
    };

    AppointmentDetails {
        title,
        duration,
        price: format!("£{:.2}", payment.amount_major()),
    }
}

async fn handle_payment_succeeded(state: &AppState, object: &StripePaymentIntentObject) {
    let customer_id = object.customer.as_deref().unwrap_or("");

    // All DB access happens before any await: the pooled connection must not
    // be held across suspension points.
    let outcome = {
        let conn = match state.db.get() {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to get DB connection for webhook");
                return;
            }
        };

        match queries::complete_payment(&conn, &object.id, customer_id) {
            Ok(Some(payment)) => {
                tracing::info!(payment_id = payment.id, "Payment marked as completed");
                let lead = match payment.lead_id {
                    Some(lead_id) => match queries::get_lead_by_id(&conn, lead_id) {
                        Ok(lead) => lead,
                        Err(e) => {
                            tracing::error!(error = %e, lead_id, "Failed to load lead for webhook");
                            None
                        }
                    },
                    None => None,
                };
                Some((payment, lead))
            }
            Ok(None) => {
                // Zero rows matched: either a replay of an already-completed
                // intent or an intent we never created. Both are acknowledged
                // without side effects.
                match queries::get_payment_by_intent(&conn, &object.id) {
                    Ok(Some(existing)) => {
                        tracing::info!(
                            intent_id = %object.id,
                            status = %existing.status,
                            "Webhook replay for already-processed payment, skipping"
                        );
                    }
                    Ok(None) => {
                        tracing::warn!(intent_id = %object.id, "Payment not found for intent");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, intent_id = %object.id, "Payment lookup failed");
                    }
                }
                None
            }
            Err(e) => {
                tracing::error!(error = %e, intent_id = %object.id, "Failed to complete payment");
                None
            }
        }
    };

    let Some((payment, lead)) = outcome else {
        return;
    };

    if let Some(lead) = lead {
        send_post_payment_confirmation(state, &payment, &lead).await;
    }
}

async fn send_post_payment_confirmation(state: &AppState, payment: &Payment, lead: &Lead) {
    let appointment = appointment_from_payment(payment);
    let summary = PaymentSummary {
        status: "completed".to_string(),
        payment_id: payment.id,
    };

    if let Err(e) = state
        .notifier
        .send_booking_confirmation(lead, &appointment, Some(&summary))
        .await
    {
        tracing::error!(
            error = %e,
            lead_id = lead.id,
            "Failed to send booking confirmation after payment"
        );
    } else {
        tracing::info!(
            lead_id = lead.id,
            "Booking confirmation email sent after payment success"
        );
    }
}

fn handle_payment_failed(state: &AppState, object: &StripePaymentIntentObject) {
    let conn = match state.db.get() {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "Failed to get DB connection for webhook");
            return;
        }
    };

    match queries::fail_payment(&conn, &object.id) {
        Ok(Some(payment)) => {
            tracing::info!(payment_id = payment.id, "Payment marked as failed");
        }
        Ok(None) => {
            tracing::warn!(intent_id = %object.id, "Payment not found for intent");
        }
        Err(e) => {
            tracing::error!(error = %e, intent_id = %object.id, "Failed to mark payment failed");
        }
    }
}

/// POST /payments/webhook/
///
/// Verifies the Stripe signature over the raw body, then applies the status
/// transition. Event types we don't handle are acknowledged so Stripe stops
/// redelivering them.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let Some(stripe) = state.stripe.as_ref() else {
        tracing::error!("Webhook received but Stripe is not configured");
        return Err(AppError::BadRequest("Payment processing is not configured".into()));
    };

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::BadRequest("Missing stripe-signature header".into()))?;

    if !stripe.verify_webhook_signature(&body, signature)? {
        tracing::error!("Invalid webhook signature");
        return Err(AppError::BadRequest("Invalid signature".into()));
    }

    let event: StripeWebhookEvent = serde_json::from_slice(&body).map_err(|e| {
        tracing::error!(error = %e, "Invalid webhook payload");
        AppError::BadRequest("Invalid payload".into())
    })?;
    tracing::info!(event_type = %event.event_type, "Webhook event received");

    match event.event_type.as_str() {
        "payment_intent.succeeded" => {
            let object: StripePaymentIntentObject = serde_json::from_value(event.data.object)
                .map_err(|e| {
                    tracing::error!(error = %e, "Invalid payment_intent object");
                    AppError::BadRequest("Invalid payload".into())
                })?;
            handle_payment_succeeded(&state, &object).await;
        }
        "payment_intent.payment_failed" => {
            let object: StripePaymentIntentObject = serde_json::from_value(event.data.object)
                .map_err(|e| {
                    tracing::error!(error = %e, "Invalid payment_intent object");
                    AppError::BadRequest("Invalid payload".into())
                })?;
            handle_payment_failed(&state, &object);
        }
        other => {
            tracing::debug!(event_type = %other, "Ignoring unhandled webhook event type");
        }
    }

    Ok(Json(json!({ "status": "success" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentStatus;

    fn payment_with_description(description: &str, amount_minor: i64) -> Payment {
        Payment {
            id: 1,
            lead_id: Some(2),
            stripe_payment_intent_id: "pi_test".into(),
            stripe_customer_id: String::new(),
            amount_minor,
            currency: "gbp".into(),
            status: PaymentStatus::Completed,
            description: description.into(),
            customer_email: "jane@example.com".into(),
            customer_name: "Jane".into(),
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn appointment_rebuilt_from_description_and_amount() {
        let payment = payment_with_description("Consultation - 1 hour", 8000);
        let appt = appointment_from_payment(&payment);
        assert_eq!(appt.title, "Consultation");
        assert_eq!(appt.duration, "1 hour");
        assert_eq!(appt.price, "£80.00");
    }

    #[test]
    fn appointment_without_separator_keeps_whole_description() {
        let payment = payment_with_description("Service Payment", 4999);
        let appt = appointment_from_payment(&payment);
        assert_eq!(appt.title, "Service Payment");
        assert_eq!(appt.duration, "N/A");
        assert_eq!(appt.price, "£49.99");
    }
}
