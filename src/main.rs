use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use leadline::config::Config;
use leadline::db::{create_pool, init_db, AppState};
use leadline::email::{Mailer, Notifier};
use leadline::handlers;
use leadline::payments::StripeClient;
use leadline::reviews::ReviewsClient;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "leadline=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env();

    if config.dev_mode {
        tracing::info!("Running in DEVELOPMENT mode");
    }

    // Create database connection pool and initialize schema
    let db_pool = create_pool(&config.database_path).expect("Failed to create database pool");
    {
        let conn = db_pool.get().expect("Failed to get connection");
        init_db(&conn).expect("Failed to initialize database");
    }

    let stripe = match (&config.stripe_secret_key, &config.stripe_webhook_secret) {
        (Some(secret), Some(webhook_secret)) => {
            Some(StripeClient::new(secret.clone(), webhook_secret.clone()))
        }
        (Some(secret), None) => {
            tracing::warn!("STRIPE_WEBHOOK_SECRET is not set, webhook verification will fail");
            Some(StripeClient::new(secret.clone(), String::new()))
        }
        _ => {
            tracing::warn!("STRIPE_SECRET_KEY is not set in environment variables");
            None
        }
    };

    if config.resend_api_key.is_none() {
        tracing::warn!("RESEND_API_KEY is not set, emails will be logged but not sent");
    }
    let mailer = Mailer::new(config.resend_api_key.clone(), config.mail_from.clone());
    let notifier = Notifier::new(mailer, config.notify_config());

    let state = AppState {
        db: db_pool,
        stripe,
        notifier,
        reviews: ReviewsClient::new(config.google_places_api_key.clone()),
    };

    let app = handlers::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start the server
    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Leadline server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received, stopping server...");
}
