//! Tests for the POST /leads/ endpoint and lead queries.

use axum::{body::Body, http::Request};
use serde_json::Value;
use tower::ServiceExt;

mod common;
use common::*;

async fn post_json(app: axum::Router, uri: &str, body: serde_json::Value) -> (u16, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).expect("Response should be valid JSON");
    (status, json)
}

#[tokio::test]
async fn test_valid_submission_persists_one_lead() {
    let state = test_app_state();
    let db = state.db.clone();
    let app = test_app(state);

    let (status, json) = post_json(app, "/leads/", sample_lead_json()).await;

    assert_eq!(status, 201);
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Lead submitted successfully");
    assert!(json["lead_id"].as_i64().unwrap() > 0);

    let conn = db.get().unwrap();
    assert_eq!(queries::count_leads(&conn).unwrap(), 1);
}

#[tokio::test]
async fn test_missing_required_field_rejected_without_persisting() {
    let state = test_app_state();
    let db = state.db.clone();
    let app = test_app(state);

    let mut payload = sample_lead_json();
    payload["contactPerson"] = Value::String(String::new());

    let (status, json) = post_json(app, "/leads/", payload).await;

    assert_eq!(status, 400);
    assert_eq!(json["success"], false);
    assert!(json["errors"]["contactPerson"].is_string());

    let conn = db.get().unwrap();
    assert_eq!(queries::count_leads(&conn).unwrap(), 0);
}

#[tokio::test]
async fn test_email_normalized_on_insert() {
    let state = test_app_state();
    let db = state.db.clone();
    let app = test_app(state);

    let mut payload = sample_lead_json();
    payload["email"] = Value::String("  Jane@Acme.TEST ".into());

    let (status, json) = post_json(app, "/leads/", payload).await;
    assert_eq!(status, 201);

    let conn = db.get().unwrap();
    let lead = queries::get_lead_by_id(&conn, json["lead_id"].as_i64().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(lead.email, "jane@acme.test");
}

#[tokio::test]
async fn test_free_booking_submission_succeeds() {
    // With no Resend key configured the confirmation emails are skipped,
    // but the booking path must still complete and persist the lead.
    let state = test_app_state();
    let db = state.db.clone();
    let app = test_app(state);

    let mut payload = sample_lead_json();
    payload["shortTermGoals"] = Value::String("Booking: Consultation".into());
    payload["servicesSeeking"] = Value::String("Consultation".into());
    payload["additionalInfo"] = Value::String("Appointment booking - 30 mins - Free".into());

    let (status, json) = post_json(app, "/leads/", payload).await;

    assert_eq!(status, 201);
    assert_eq!(json["success"], true);

    let conn = db.get().unwrap();
    let lead = queries::get_lead_by_id(&conn, json["lead_id"].as_i64().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(lead.additional_info, "Appointment booking - 30 mins - Free");
}

#[tokio::test]
async fn test_webinar_registration_submission_succeeds() {
    let state = test_app_state();
    let app = test_app(state);

    let mut payload = sample_lead_json();
    payload["servicesSeeking"] = Value::String("Webinar Registration".into());

    let (status, json) = post_json(app, "/leads/", payload).await;

    assert_eq!(status, 201);
    assert_eq!(json["success"], true);
}

#[test]
fn test_contacted_flag_and_notes_update() {
    let conn = setup_test_db();
    let lead = queries::create_lead(&conn, &sample_create_lead()).unwrap();
    assert!(!lead.is_contacted);

    let updated = queries::set_lead_contacted(&conn, lead.id, true, Some("Called back")).unwrap();
    assert!(updated);

    let lead = queries::get_lead_by_id(&conn, lead.id).unwrap().unwrap();
    assert!(lead.is_contacted);
    assert_eq!(lead.notes, "Called back");

    // Flag can flip without touching notes
    assert!(queries::set_lead_contacted(&conn, lead.id, false, None).unwrap());
    let lead = queries::get_lead_by_id(&conn, lead.id).unwrap().unwrap();
    assert!(!lead.is_contacted);
    assert_eq!(lead.notes, "Called back");
}

#[test]
fn test_update_missing_lead_reports_not_found() {
    let conn = setup_test_db();
    assert!(!queries::set_lead_contacted(&conn, 999, true, None).unwrap());
    assert!(!queries::delete_lead(&conn, 999).unwrap());
}
