//! Leadline - business-operations backend
//!
//! Accepts lead-generation and booking form submissions, creates Stripe
//! payment intents, reconciles payment status via webhooks, and dispatches
//! templated notification emails to staff and customers.

pub mod classify;
pub mod config;
pub mod db;
pub mod email;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod payments;
pub mod reviews;
pub mod templates;
