//! Row mapping trait and helpers for reducing boilerplate in queries.

use rusqlite::{Connection, OptionalExtension, Row, ToSql};

use crate::models::{Lead, Payment, PaymentStatus};

/// Parse a string column into an enum type, converting parse errors to
/// rusqlite errors instead of panicking on corrupt data.
fn parse_enum<T: std::str::FromStr>(row: &Row, col: usize, col_name: &str) -> rusqlite::Result<T> {
    row.get::<_, String>(col)?.parse::<T>().map_err(|_| {
        rusqlite::Error::InvalidColumnType(col, col_name.to_string(), rusqlite::types::Type::Text)
    })
}

/// Trait for constructing a type from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

/// Query for a single optional result.
pub fn query_one<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, params, T::from_row)
        .optional()
        .map_err(Into::into)
}

/// Query for multiple results.
pub fn query_all<T: FromRow>(
    conn: &Connection,
    sql: &str,
    params: &[&dyn ToSql],
) -> crate::error::Result<Vec<T>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map(params, T::from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ============ SQL SELECT Constants ============

pub const LEAD_COLS: &str = "id, business_name, contact_person, position, email, phone, \
     business_address, nature_of_business, business_activities, industry, products_services, \
     target_market, years_operation, business_structure, employees, locations, \
     short_term_goals, long_term_goals, challenges, services_seeking, additional_info, \
     company_size, annual_revenue, preferred_contact_method, urgency_level, budget_range, \
     created_at, is_contacted, notes";

pub const PAYMENT_COLS: &str = "id, lead_id, stripe_payment_intent_id, stripe_customer_id, \
     amount_minor, currency, status, description, customer_email, customer_name, \
     created_at, updated_at";

impl FromRow for Lead {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Lead {
            id: row.get(0)?,
            business_name: row.get(1)?,
            contact_person: row.get(2)?,
            position: row.get(3)?,
            email: row.get(4)?,
            phone: row.get(5)?,
            business_address: row.get(6)?,
            nature_of_business: row.get(7)?,
            business_activities: row.get(8)?,
            industry: row.get(9)?,
            products_services: row.get(10)?,
            target_market: row.get(11)?,
            years_operation: row.get(12)?,
            business_structure: row.get(13)?,
            employees: row.get(14)?,
            locations: row.get(15)?,
            short_term_goals: row.get(16)?,
            long_term_goals: row.get(17)?,
            challenges: row.get(18)?,
            services_seeking: row.get(19)?,
            additional_info: row.get(20)?,
            company_size: row.get(21)?,
            annual_revenue: row.get(22)?,
            preferred_contact_method: row.get(23)?,
            urgency_level: row.get(24)?,
            budget_range: row.get(25)?,
            created_at: row.get(26)?,
            is_contacted: row.get(27)?,
            notes: row.get(28)?,
        })
    }
}

impl FromRow for Payment {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Payment {
            id: row.get(0)?,
            lead_id: row.get(1)?,
            stripe_payment_intent_id: row.get(2)?,
            stripe_customer_id: row.get(3)?,
            amount_minor: row.get(4)?,
            currency: row.get(5)?,
            status: parse_enum::<PaymentStatus>(row, 6, "status")?,
            description: row.get(7)?,
            customer_email: row.get(8)?,
            customer_name: row.get(9)?,
            created_at: row.get(10)?,
            updated_at: row.get(11)?,
        })
    }
}
