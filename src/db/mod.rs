mod from_row;
pub mod queries;
mod schema;

pub use schema::init_db;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::email::Notifier;
use crate::payments::StripeClient;
use crate::reviews::ReviewsClient;

pub type DbPool = Pool<SqliteConnectionManager>;

/// Application state holding the database pool and injected collaborators.
///
/// Stripe is `Option` so "unconfigured" is an explicit state checked by
/// handlers, not an implicit falsy global.
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub stripe: Option<StripeClient>,
    pub notifier: Notifier,
    pub reviews: ReviewsClient,
}

pub fn create_pool(database_path: &str) -> Result<DbPool, r2d2::Error> {
    // Foreign keys must be enabled per connection for the payments.lead_id
    // SET NULL behavior to apply.
    let manager = SqliteConnectionManager::file(database_path)
        .with_init(|conn| conn.execute_batch("PRAGMA foreign_keys = ON;"));
    Pool::builder().max_size(10).build(manager)
}
