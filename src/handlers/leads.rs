use axum::{extract::State, http::StatusCode};
use serde_json::{json, Value};

use crate::classify::{classify, SubmissionKind};
use crate::db::{queries, AppState};
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::models::CreateLead;

/// POST /leads/
///
/// Persists the submission, classifies it, and dispatches the matching
/// notification emails. Email failures are logged but never fail the
/// request: the lead is already stored and staff can follow up from the
/// database.
pub async fn submit_lead(
    State(state): State<AppState>,
    Json(input): Json<CreateLead>,
) -> Result<(StatusCode, Json<Value>)> {
    if let Err(errors) = input.validate() {
        tracing::warn!(?errors, "Lead submission validation failed");
        return Err(AppError::Validation(errors));
    }

    // Connection is scoped: it must be dropped before the email awaits.
    let lead = {
        let conn = state.db.get()?;
        queries::create_lead(&conn, &input)?
    };
    tracing::info!(lead_id = lead.id, email = %lead.email, "Lead created");

    match classify(
        &lead.short_term_goals,
        &lead.services_seeking,
        &lead.additional_info,
    ) {
        SubmissionKind::Booking { details, free } => {
            if free {
                if let Err(e) = state
                    .notifier
                    .send_booking_confirmation(&lead, &details, None)
                    .await
                {
                    tracing::error!(
                        error = %e,
                        lead_id = lead.id,
                        "Failed to send booking confirmation for free booking"
                    );
                } else {
                    tracing::info!(
                        lead_id = lead.id,
                        "Booking confirmation emails sent for free booking"
                    );
                }
            } else {
                tracing::info!(
                    lead_id = lead.id,
                    "Paid booking submitted. Email will be sent after payment is successful."
                );
            }
        }
        SubmissionKind::WebinarRegistration => {
            if let Err(e) = state.notifier.send_webinar_registration(&lead).await {
                tracing::error!(
                    error = %e,
                    lead_id = lead.id,
                    "Failed to send webinar registration emails"
                );
            }
        }
        SubmissionKind::Standard => {
            // Staff notification and customer confirmation are independent:
            // one failing must not stop the other.
            if let Err(e) = state.notifier.send_lead_notification(&lead).await {
                tracing::error!(error = %e, lead_id = lead.id, "Failed to send notification email");
            }
            if let Err(e) = state.notifier.send_lead_confirmation(&lead).await {
                tracing::error!(error = %e, lead_id = lead.id, "Failed to send confirmation email");
            }
        }
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Lead submitted successfully",
            "lead_id": lead.id,
        })),
    ))
}
