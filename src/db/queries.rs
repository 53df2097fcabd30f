use chrono::Utc;
use rusqlite::{params, Connection};

use crate::error::Result;
use crate::models::{CreateLead, CreatePayment, Lead, Payment};

use super::from_row::{query_all, query_one, LEAD_COLS, PAYMENT_COLS};

fn now() -> i64 {
    Utc::now().timestamp()
}

// ============ Leads ============

/// Insert a lead. Returns the stored row with its generated id.
pub fn create_lead(conn: &Connection, input: &CreateLead) -> Result<Lead> {
    let created_at = now();
    let email = input.email.trim().to_lowercase();

    conn.execute(
        "INSERT INTO leads (
            business_name, contact_person, position, email, phone, business_address,
            nature_of_business, business_activities, industry, products_services, target_market,
            years_operation, business_structure, employees, locations,
            short_term_goals, long_term_goals, challenges, services_seeking, additional_info,
            company_size, annual_revenue, preferred_contact_method, urgency_level, budget_range,
            created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15,
                  ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)",
        params![
            &input.business_name,
            &input.contact_person,
            &input.position,
            &email,
            &input.phone,
            &input.business_address,
            &input.nature_of_business,
            &input.business_activities,
            &input.industry,
            &input.products_services,
            &input.target_market,
            &input.years_operation,
            &input.business_structure,
            &input.employees,
            &input.locations,
            &input.short_term_goals,
            &input.long_term_goals,
            &input.challenges,
            &input.services_seeking,
            &input.additional_info,
            &input.company_size,
            &input.annual_revenue,
            &input.preferred_contact_method,
            &input.urgency_level,
            &input.budget_range,
            created_at,
        ],
    )?;

    let id = conn.last_insert_rowid();

    Ok(Lead {
        id,
        business_name: input.business_name.clone(),
        contact_person: input.contact_person.clone(),
        position: input.position.clone(),
        email,
        phone: input.phone.clone(),
        business_address: input.business_address.clone(),
        nature_of_business: input.nature_of_business.clone(),
        business_activities: input.business_activities.clone(),
        industry: input.industry.clone(),
        products_services: input.products_services.clone(),
        target_market: input.target_market.clone(),
        years_operation: input.years_operation.clone(),
        business_structure: input.business_structure.clone(),
        employees: input.employees.clone(),
        locations: input.locations.clone(),
        short_term_goals: input.short_term_goals.clone(),
        long_term_goals: input.long_term_goals.clone(),
        challenges: input.challenges.clone(),
        services_seeking: input.services_seeking.clone(),
        additional_info: input.additional_info.clone(),
        company_size: input.company_size.clone(),
        annual_revenue: input.annual_revenue.clone(),
        preferred_contact_method: input.preferred_contact_method.clone(),
        urgency_level: input.urgency_level.clone(),
        budget_range: input.budget_range.clone(),
        created_at,
        is_contacted: false,
        notes: String::new(),
    })
}

pub fn get_lead_by_id(conn: &Connection, id: i64) -> Result<Option<Lead>> {
    query_one(
        conn,
        &format!("SELECT {} FROM leads WHERE id = ?1", LEAD_COLS),
        &[&id],
    )
}

pub fn count_leads(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM leads", [], |row| row.get(0))?;
    Ok(count)
}

/// Staff-side mutation: flip the contacted flag and optionally replace notes.
/// The only post-insert mutation a lead supports.
pub fn set_lead_contacted(
    conn: &Connection,
    id: i64,
    is_contacted: bool,
    notes: Option<&str>,
) -> Result<bool> {
    let affected = match notes {
        Some(notes) => conn.execute(
            "UPDATE leads SET is_contacted = ?1, notes = ?2 WHERE id = ?3",
            params![is_contacted, notes, id],
        )?,
        None => conn.execute(
            "UPDATE leads SET is_contacted = ?1 WHERE id = ?2",
            params![is_contacted, id],
        )?,
    };
    Ok(affected > 0)
}

/// Staff-side deletion. Referencing payments are kept with lead_id nulled.
pub fn delete_lead(conn: &Connection, id: i64) -> Result<bool> {
    let affected = conn.execute("DELETE FROM leads WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

// ============ Payments ============

/// Insert a pending payment correlated to a Stripe payment intent.
pub fn create_payment(conn: &Connection, input: &CreatePayment) -> Result<Payment> {
    let now = now();
    let currency = input.currency.trim().to_lowercase();

    conn.execute(
        "INSERT INTO payments (
            lead_id, stripe_payment_intent_id, amount_minor, currency,
            description, customer_email, customer_name, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            input.lead_id,
            &input.stripe_payment_intent_id,
            input.amount_minor,
            &currency,
            &input.description,
            &input.customer_email,
            &input.customer_name,
            now,
            now,
        ],
    )?;

    Ok(Payment {
        id: conn.last_insert_rowid(),
        lead_id: input.lead_id,
        stripe_payment_intent_id: input.stripe_payment_intent_id.clone(),
        stripe_customer_id: String::new(),
        amount_minor: input.amount_minor,
        currency,
        status: crate::models::PaymentStatus::Pending,
        description: input.description.clone(),
        customer_email: input.customer_email.clone(),
        customer_name: input.customer_name.clone(),
        created_at: now,
        updated_at: now,
    })
}

pub fn get_payment_by_intent(conn: &Connection, intent_id: &str) -> Result<Option<Payment>> {
    query_one(
        conn,
        &format!(
            "SELECT {} FROM payments WHERE stripe_payment_intent_id = ?1",
            PAYMENT_COLS
        ),
        &[&intent_id],
    )
}

pub fn list_payments_for_lead(conn: &Connection, lead_id: i64) -> Result<Vec<Payment>> {
    query_all(
        conn,
        &format!(
            "SELECT {} FROM payments WHERE lead_id = ?1 ORDER BY created_at DESC",
            PAYMENT_COLS
        ),
        &[&lead_id],
    )
}

pub fn count_payments(conn: &Connection) -> Result<i64> {
    let count = conn.query_row("SELECT COUNT(*) FROM payments", [], |row| row.get(0))?;
    Ok(count)
}

/// Compare-and-set: mark the payment completed and store the processor's
/// customer id. Matches only non-completed rows, so a webhook replay (or a
/// concurrent redelivery) updates zero rows and returns `None` - the caller
/// must send confirmation emails only on `Some`.
///
/// A previously failed payment may still complete (failure later resolved).
pub fn complete_payment(
    conn: &Connection,
    intent_id: &str,
    customer_id: &str,
) -> Result<Option<Payment>> {
    query_one(
        conn,
        &format!(
            "UPDATE payments SET status = 'completed', stripe_customer_id = ?1, updated_at = ?2
             WHERE stripe_payment_intent_id = ?3 AND status IN ('pending', 'failed')
             RETURNING {}",
            PAYMENT_COLS
        ),
        &[&customer_id, &now(), &intent_id],
    )
}

/// Compare-and-set: mark a pending payment failed. Completed payments are
/// never demoted.
pub fn fail_payment(conn: &Connection, intent_id: &str) -> Result<Option<Payment>> {
    query_one(
        conn,
        &format!(
            "UPDATE payments SET status = 'failed', updated_at = ?1
             WHERE stripe_payment_intent_id = ?2 AND status = 'pending'
             RETURNING {}",
            PAYMENT_COLS
        ),
        &[&now(), &intent_id],
    )
}
