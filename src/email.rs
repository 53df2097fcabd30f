//! Email delivery via the Resend API.
//!
//! [`Mailer`] is the transport: one message in, retried HTTP out. When no
//! API key is configured it logs and reports [`EmailSendResult::NoApiKey`]
//! instead of failing, so local development and tests run without
//! credentials. [`Notifier`] sits on top and knows which template goes to
//! which recipients for each business event.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::classify::AppointmentDetails;
use crate::error::{AppError, Result};
use crate::models::Lead;
use crate::templates::{self, JobApplication, PaymentSummary};

/// Retry delays in seconds (exponential backoff: 1s, 4s, 16s)
const RETRY_DELAYS: &[u64] = &[1, 4, 16];

const RESEND_API_URL: &str = "https://api.resend.com/emails";

/// Result of attempting to send a notification email.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailSendResult {
    /// Email was sent successfully via Resend
    Sent,
    /// No API key configured, email skipped (logged only)
    NoApiKey,
}

/// A file attached to an outgoing email (job application CVs).
#[derive(Debug, Clone)]
pub struct EmailAttachment {
    pub filename: String,
    pub content: Vec<u8>,
}

/// Resend API request body.
#[derive(Debug, Serialize)]
struct ResendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<ResendAttachment>,
}

/// Attachment in Resend's wire format (base64 content).
#[derive(Debug, Serialize)]
struct ResendAttachment {
    filename: String,
    content: String,
}

/// Resend API response.
#[derive(Debug, Deserialize)]
struct ResendEmailResponse {
    #[allow(dead_code)]
    id: String,
}

/// Low-level email transport with retry.
#[derive(Clone)]
pub struct Mailer {
    /// Resend API key (from ENV). None disables sending.
    api_key: Option<String>,
    /// "from" address for all outgoing mail (from ENV)
    from_email: String,
    http_client: Client,
}

impl Mailer {
    pub fn new(api_key: Option<String>, from_email: String) -> Self {
        Self {
            api_key,
            from_email,
            http_client: Client::new(),
        }
    }

    /// Send one email to one or more recipients, retrying transient failures.
    pub async fn send(
        &self,
        to: &[&str],
        subject: &str,
        text: &str,
        attachment: Option<&EmailAttachment>,
    ) -> Result<EmailSendResult> {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::warn!(
                subject = %subject,
                "No Resend API key configured, skipping email"
            );
            return Ok(EmailSendResult::NoApiKey);
        };

        let attachments = match attachment {
            Some(a) => vec![ResendAttachment {
                filename: a.filename.clone(),
                content: BASE64.encode(&a.content),
            }],
            None => Vec::new(),
        };

        let request = ResendEmailRequest {
            from: &self.from_email,
            to: to.to_vec(),
            subject,
            text,
            attachments,
        };

        self.send_request_with_retry(api_key, &request).await
    }

    /// Send a request to Resend API with exponential backoff retry.
    ///
    /// Retries on transient errors (network issues, 5xx, 429 rate limit).
    /// Fails immediately on non-transient errors (4xx except 429).
    async fn send_request_with_retry(
        &self,
        api_key: &str,
        request: &ResendEmailRequest<'_>,
    ) -> Result<EmailSendResult> {
        let mut last_error: Option<AppError> = None;

        for (attempt, delay_secs) in std::iter::once(&0u64).chain(RETRY_DELAYS).enumerate() {
            // Sleep before retry (skip on first attempt)
            if *delay_secs > 0 {
                tracing::warn!(
                    attempt,
                    delay_secs,
                    "Retrying email send after transient failure"
                );
                tokio::time::sleep(Duration::from_secs(*delay_secs)).await;
            }

            match self.send_resend_request(api_key, request).await {
                Ok(()) => {
                    if attempt > 0 {
                        tracing::info!(
                            attempt,
                            subject = %request.subject,
                            "Email sent successfully after retry"
                        );
                    } else {
                        tracing::info!(
                            subject = %request.subject,
                            "Email sent via Resend"
                        );
                    }
                    return Ok(EmailSendResult::Sent);
                }
                Err((error, is_transient)) => {
                    if is_transient {
                        last_error = Some(error);
                    } else {
                        return Err(error);
                    }
                }
            }
        }

        tracing::error!(
            subject = %request.subject,
            attempts = RETRY_DELAYS.len() + 1,
            "Email send failed after all retries"
        );
        Err(last_error.unwrap_or_else(|| {
            AppError::Internal("Email service error: all retries exhausted".into())
        }))
    }

    /// Send a single request to Resend API.
    ///
    /// Returns Ok(()) on success, or Err((AppError, is_transient)) on failure.
    async fn send_resend_request(
        &self,
        api_key: &str,
        request: &ResendEmailRequest<'_>,
    ) -> std::result::Result<(), (AppError, bool)> {
        let response = self
            .http_client
            .post(RESEND_API_URL)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to send request to Resend API");
                // Network errors are transient
                (
                    AppError::Internal(format!("Email service error: {}", e)),
                    true,
                )
            })?;

        let status = response.status();

        if status.is_success() {
            let _result: ResendEmailResponse = response.json().await.map_err(|e| {
                tracing::error!(error = %e, "Failed to parse Resend API response");
                (
                    AppError::Internal("Email service response error".into()),
                    false,
                )
            })?;
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();

            let is_transient = status.as_u16() == 429 // Rate limited
                || status.is_server_error(); // 5xx errors

            if is_transient {
                tracing::warn!(
                    status = %status,
                    body = %body,
                    "Resend API returned transient error"
                );
            } else {
                tracing::error!(
                    status = %status,
                    body = %body,
                    "Resend API returned non-transient error"
                );
            }

            Err((
                AppError::Internal(format!("Email service error: {} - {}", status, body)),
                is_transient,
            ))
        }
    }
}

/// Recipient lists and branding for notifications (from ENV).
#[derive(Clone)]
pub struct NotifyConfig {
    pub lead_recipients: Vec<String>,
    pub booking_recipients: Vec<String>,
    pub careers_recipient: String,
    pub company_name: String,
    pub webinar_time: String,
}

/// Routes business events to templates and recipients.
#[derive(Clone)]
pub struct Notifier {
    mailer: Mailer,
    config: NotifyConfig,
}

impl Notifier {
    pub fn new(mailer: Mailer, config: NotifyConfig) -> Self {
        Self { mailer, config }
    }

    fn as_refs(recipients: &[String]) -> Vec<&str> {
        recipients.iter().map(String::as_str).collect()
    }

    /// Staff notification for a standard lead.
    pub async fn send_lead_notification(&self, lead: &Lead) -> Result<EmailSendResult> {
        let (subject, body) = templates::lead_notification(lead);
        self.mailer
            .send(&Self::as_refs(&self.config.lead_recipients), &subject, &body, None)
            .await
    }

    /// Thank-you confirmation to the submitter.
    pub async fn send_lead_confirmation(&self, lead: &Lead) -> Result<EmailSendResult> {
        let (subject, body) = templates::lead_confirmation(lead, &self.config.company_name);
        self.mailer.send(&[&lead.email], &subject, &body, None).await
    }

    /// Booking confirmation pair: staff first, then customer. The two sends
    /// are independent so a staff-side failure never suppresses the
    /// customer's confirmation (and vice versa). Returns the first error
    /// after both attempts.
    pub async fn send_booking_confirmation(
        &self,
        lead: &Lead,
        appointment: &AppointmentDetails,
        payment: Option<&PaymentSummary>,
    ) -> Result<()> {
        let (staff_subject, staff_body) = templates::booking_staff(lead, appointment, payment);
        let staff_result = self
            .mailer
            .send(
                &Self::as_refs(&self.config.booking_recipients),
                &staff_subject,
                &staff_body,
                None,
            )
            .await;
        if let Err(ref e) = staff_result {
            tracing::error!(error = %e, lead_id = lead.id, "Failed to send staff booking email");
        }

        let (customer_subject, customer_body) =
            templates::booking_customer(lead, appointment, &self.config.company_name);
        let customer_result = self
            .mailer
            .send(&[&lead.email], &customer_subject, &customer_body, None)
            .await;
        if let Err(ref e) = customer_result {
            tracing::error!(error = %e, lead_id = lead.id, "Failed to send customer booking email");
        }

        staff_result?;
        customer_result?;
        Ok(())
    }

    /// Webinar registration pair, same independence as bookings.
    pub async fn send_webinar_registration(&self, lead: &Lead) -> Result<()> {
        let (staff_subject, staff_body) = templates::webinar_staff(lead, &self.config.webinar_time);
        let staff_result = self
            .mailer
            .send(
                &Self::as_refs(&self.config.lead_recipients),
                &staff_subject,
                &staff_body,
                None,
            )
            .await;
        if let Err(ref e) = staff_result {
            tracing::error!(error = %e, lead_id = lead.id, "Failed to send staff webinar email");
        }

        let (customer_subject, customer_body) =
            templates::webinar_customer(lead, &self.config.webinar_time, &self.config.company_name);
        let customer_result = self
            .mailer
            .send(&[&lead.email], &customer_subject, &customer_body, None)
            .await;
        if let Err(ref e) = customer_result {
            tracing::error!(error = %e, lead_id = lead.id, "Failed to send attendee webinar email");
        }

        staff_result?;
        customer_result?;
        Ok(())
    }

    /// Careers notification with the CV attached.
    pub async fn send_job_application(
        &self,
        application: &JobApplication,
        cv: &EmailAttachment,
    ) -> Result<EmailSendResult> {
        let submitted_at = chrono::Utc::now().timestamp();
        let (subject, body) = templates::job_application(application, submitted_at);
        self.mailer
            .send(&[&self.config.careers_recipient], &subject, &body, Some(cv))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retry_delays_configuration() {
        assert_eq!(RETRY_DELAYS.len(), 3, "Should have 3 retry attempts");
        assert_eq!(RETRY_DELAYS, &[1, 4, 16], "Exponential backoff: 1s, 4s, 16s");

        let total_delay: u64 = RETRY_DELAYS.iter().sum();
        assert_eq!(total_delay, 21);
    }

    #[tokio::test]
    async fn missing_api_key_is_not_an_error() {
        let mailer = Mailer::new(None, "no-reply@example.test".into());
        let result = mailer
            .send(&["someone@example.test"], "Subject", "Body", None)
            .await
            .unwrap();
        assert_eq!(result, EmailSendResult::NoApiKey);
    }

    #[test]
    fn attachment_serializes_as_base64() {
        let attachment = ResendAttachment {
            filename: "cv.pdf".into(),
            content: BASE64.encode(b"hello"),
        };
        let json = serde_json::to_string(&attachment).unwrap();
        assert!(json.contains("aGVsbG8="));
    }
}
