use rusqlite::Connection;

/// Initialize the database schema.
pub fn init_db(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        -- Leads (form submissions - written once, only is_contacted/notes mutate)
        CREATE TABLE IF NOT EXISTS leads (
            id INTEGER PRIMARY KEY AUTOINCREMENT,

            business_name TEXT NOT NULL DEFAULT '',
            contact_person TEXT NOT NULL,
            position TEXT NOT NULL DEFAULT '',
            email TEXT NOT NULL,
            phone TEXT NOT NULL DEFAULT '',
            business_address TEXT NOT NULL DEFAULT '',

            nature_of_business TEXT NOT NULL DEFAULT '',
            business_activities TEXT NOT NULL DEFAULT '',
            industry TEXT NOT NULL DEFAULT '',
            products_services TEXT NOT NULL DEFAULT '',
            target_market TEXT NOT NULL DEFAULT '',

            years_operation TEXT NOT NULL,
            business_structure TEXT NOT NULL,
            employees TEXT NOT NULL DEFAULT '',
            locations TEXT NOT NULL DEFAULT '',

            short_term_goals TEXT NOT NULL,
            long_term_goals TEXT NOT NULL,
            challenges TEXT NOT NULL DEFAULT '',
            services_seeking TEXT NOT NULL,
            additional_info TEXT NOT NULL,

            company_size TEXT NOT NULL DEFAULT '',
            annual_revenue TEXT NOT NULL DEFAULT '',
            preferred_contact_method TEXT NOT NULL DEFAULT '',
            urgency_level TEXT NOT NULL DEFAULT '',
            budget_range TEXT NOT NULL DEFAULT '',

            created_at INTEGER NOT NULL,
            is_contacted INTEGER NOT NULL DEFAULT 0,
            notes TEXT NOT NULL DEFAULT ''
        );
        CREATE INDEX IF NOT EXISTS idx_leads_created ON leads(created_at DESC);
        CREATE INDEX IF NOT EXISTS idx_leads_email ON leads(email);

        -- Payments (one row per payment intent; intent id is the sole
        -- correlation key for webhook events)
        CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            lead_id INTEGER REFERENCES leads(id) ON DELETE SET NULL,
            stripe_payment_intent_id TEXT NOT NULL UNIQUE,
            stripe_customer_id TEXT NOT NULL DEFAULT '',
            amount_minor INTEGER NOT NULL,
            currency TEXT NOT NULL DEFAULT 'gbp',
            status TEXT NOT NULL DEFAULT 'pending'
                CHECK (status IN ('pending', 'completed', 'failed', 'refunded')),
            description TEXT NOT NULL DEFAULT '',
            customer_email TEXT NOT NULL DEFAULT '',
            customer_name TEXT NOT NULL DEFAULT '',
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_payments_lead ON payments(lead_id);
        CREATE INDEX IF NOT EXISTS idx_payments_status ON payments(status);
        "#,
    )
}
