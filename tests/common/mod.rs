//! Test utilities and fixtures for Leadline integration tests

#![allow(dead_code)]

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;

pub use leadline::db::{init_db, queries, AppState, DbPool};
pub use leadline::email::{Mailer, Notifier, NotifyConfig};
pub use leadline::models::*;
pub use leadline::payments::StripeClient;
pub use leadline::reviews::ReviewsClient;

pub const TEST_WEBHOOK_SECRET: &str = "whsec_test_secret";

/// Create an in-memory test database with schema initialized
pub fn setup_test_db() -> Connection {
    let conn = Connection::open_in_memory().expect("Failed to create in-memory database");
    init_db(&conn).expect("Failed to initialize schema");
    conn
}

/// Create an in-memory pool with schema initialized.
///
/// max_size(1) because each :memory: connection is its own database; a
/// second connection would see an empty schema.
pub fn setup_test_pool() -> DbPool {
    let manager = SqliteConnectionManager::memory()
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    let pool = Pool::builder()
        .max_size(1)
        .build(manager)
        .expect("Failed to create test pool");
    {
        let conn = pool.get().expect("Failed to get test connection");
        init_db(&conn).expect("Failed to initialize schema");
    }
    pool
}

/// App state with an in-memory database, a Stripe client with a known
/// webhook secret, and a notifier with no API key (emails skipped).
pub fn test_app_state() -> AppState {
    let mailer = Mailer::new(None, "no-reply@test.local".to_string());
    let notifier = Notifier::new(
        mailer,
        NotifyConfig {
            lead_recipients: vec!["admin@test.local".to_string()],
            booking_recipients: vec!["admin@test.local".to_string(), "office@test.local".to_string()],
            careers_recipient: "careers@test.local".to_string(),
            company_name: "Test Co".to_string(),
            webinar_time: "6PM".to_string(),
        },
    );

    AppState {
        db: setup_test_pool(),
        stripe: Some(StripeClient::new(
            "sk_test_xxx".to_string(),
            TEST_WEBHOOK_SECRET.to_string(),
        )),
        notifier,
        reviews: ReviewsClient::new(None),
    }
}

/// Build the full application router around a test state.
pub fn test_app(state: AppState) -> axum::Router {
    leadline::handlers::router().with_state(state)
}

/// A valid lead insert payload for query-level tests.
pub fn sample_create_lead() -> CreateLead {
    CreateLead {
        business_name: "Acme Ltd".into(),
        contact_person: "Jane Smith".into(),
        email: "jane@acme.test".into(),
        phone: "0123456789".into(),
        years_operation: "5".into(),
        business_structure: "Limited Company".into(),
        short_term_goals: "Grow revenue".into(),
        long_term_goals: "Expand nationally".into(),
        services_seeking: "Business consulting".into(),
        additional_info: "Found you on Google".into(),
        ..Default::default()
    }
}

/// A valid lead submission payload in the wire (camelCase) format.
pub fn sample_lead_json() -> serde_json::Value {
    serde_json::json!({
        "businessName": "Acme Ltd",
        "contactPerson": "Jane Smith",
        "email": "jane@acme.test",
        "phone": "0123456789",
        "yearsOperation": "5",
        "businessStructure": "Limited Company",
        "shortTermGoals": "Grow revenue",
        "longTermGoals": "Expand nationally",
        "servicesSeeking": "Business consulting",
        "additionalInfo": "Found you on Google",
    })
}

/// Compute a Stripe-format webhook signature header for a payload.
pub fn stripe_signature_header(payload: &[u8], secret: &str, timestamp: i64) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    type HmacSha256 = Hmac<Sha256>;

    let signed_payload = format!("{}.{}", timestamp, String::from_utf8_lossy(payload));
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(signed_payload.as_bytes());
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("t={},v1={}", timestamp, signature)
}
