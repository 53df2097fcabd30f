use axum::{
    extract::{Multipart, State},
    http::StatusCode,
};
use serde_json::{json, Value};

use crate::db::AppState;
use crate::email::EmailAttachment;
use crate::error::{AppError, Result};
use crate::extractors::Json;
use crate::templates::JobApplication;

/// POST /job-application/
///
/// Multipart form: text fields plus a `cv` file. The application is not
/// persisted; the whole submission travels to the careers inbox with the CV
/// attached.
pub async fn submit_job_application(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>)> {
    let mut full_name = String::new();
    let mut email = String::new();
    let mut phone = String::new();
    let mut position = String::new();
    let mut cover_letter = String::new();
    let mut cv: Option<EmailAttachment> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::warn!(error = %e, "Malformed multipart body in job application");
        AppError::BadRequest("Invalid form data".into())
    })? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            "full_name" => full_name = read_text(field).await?,
            "email" => email = read_text(field).await?,
            "phone" => phone = read_text(field).await?,
            "position" => position = read_text(field).await?,
            "cover_letter" => cover_letter = read_text(field).await?,
            "cv" => {
                let filename = field.file_name().unwrap_or("cv").to_string();
                let content = field.bytes().await.map_err(|e| {
                    tracing::warn!(error = %e, "Failed to read CV upload");
                    AppError::BadRequest("Invalid form data".into())
                })?;
                cv = Some(EmailAttachment {
                    filename,
                    content: content.to_vec(),
                });
            }
            other => {
                tracing::debug!(field = %other, "Ignoring unknown job application field");
            }
        }
    }

    let all_present = !full_name.is_empty()
        && !email.is_empty()
        && !phone.is_empty()
        && !position.is_empty()
        && !cover_letter.is_empty();
    let (Some(cv), true) = (cv, all_present) else {
        return Err(AppError::BadRequest(
            "All fields including CV are required".into(),
        ));
    };

    let application = JobApplication {
        full_name,
        email,
        phone,
        position,
        cover_letter,
    };

    state
        .notifier
        .send_job_application(&application, &cv)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to send job application email");
            AppError::Internal("An error occurred while processing your application".into())
        })?;

    tracing::info!(applicant = %application.full_name, "Job application email sent");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Application submitted successfully",
        })),
    ))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String> {
    field.text().await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to read multipart field");
        AppError::BadRequest("Invalid form data".into())
    })
}
