use std::env;

use crate::email::NotifyConfig;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    pub dev_mode: bool,

    pub stripe_secret_key: Option<String>,
    pub stripe_webhook_secret: Option<String>,
    pub google_places_api_key: Option<String>,

    pub resend_api_key: Option<String>,
    pub mail_from: String,
    pub lead_recipients: Vec<String>,
    pub booking_recipients: Vec<String>,
    pub careers_recipient: String,
    pub company_name: String,
    pub webinar_time: String,
}

/// Read a comma-separated env var into a list, dropping empty entries.
fn env_list(key: &str, default: &str) -> Vec<String> {
    env::var(key)
        .unwrap_or_else(|_| default.to_string())
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let dev_mode = env::var("LEADLINE_ENV")
            .map(|v| v == "dev" || v == "development")
            .unwrap_or(false);

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "leadline.db".to_string()),
            dev_mode,

            stripe_secret_key: env::var("STRIPE_SECRET_KEY").ok().filter(|s| !s.is_empty()),
            stripe_webhook_secret: env::var("STRIPE_WEBHOOK_SECRET")
                .ok()
                .filter(|s| !s.is_empty()),
            google_places_api_key: env::var("GOOGLE_PLACES_API_KEY")
                .ok()
                .filter(|s| !s.is_empty()),

            resend_api_key: env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty()),
            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "no-reply@brincesolutions.com".to_string()),
            lead_recipients: env_list("LEAD_RECIPIENTS", "admin@brincesolutions.com"),
            booking_recipients: env_list(
                "BOOKING_RECIPIENTS",
                "admin@brincesolutions.com,office@brincesolutions.com",
            ),
            careers_recipient: env::var("CAREERS_RECIPIENT")
                .unwrap_or_else(|_| "sales@brincesolutions.com".to_string()),
            company_name: env::var("COMPANY_NAME")
                .unwrap_or_else(|_| "Brince Solutions".to_string()),
            webinar_time: env::var("WEBINAR_TIME").unwrap_or_else(|_| "6PM".to_string()),
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn notify_config(&self) -> NotifyConfig {
        NotifyConfig {
            lead_recipients: self.lead_recipients.clone(),
            booking_recipients: self.booking_recipients.clone(),
            careers_recipient: self.careers_recipient.clone(),
            company_name: self.company_name.clone(),
            webinar_time: self.webinar_time.clone(),
        }
    }
}
