//! Plain-text notification templates.
//!
//! Every template is a pure function from domain data to a
//! `(subject, body)` pair so content can be asserted in tests without a
//! mail transport. Recipient selection and delivery live in [`crate::email`].

use chrono::{TimeZone, Utc};

use crate::classify::AppointmentDetails;
use crate::models::Lead;

const DIVIDER: &str =
    "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Payment facts surfaced in the staff booking notification.
#[derive(Debug, Clone)]
pub struct PaymentSummary {
    pub status: String,
    pub payment_id: i64,
}

/// A careers form submission. The CV attachment travels separately.
#[derive(Debug, Clone)]
pub struct JobApplication {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub cover_letter: String,
}

fn or_not_provided(value: &str) -> &str {
    if value.is_empty() {
        "Not provided"
    } else {
        value
    }
}

fn format_timestamp(ts: i64) -> String {
    match Utc.timestamp_opt(ts, 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        None => ts.to_string(),
    }
}

/// Staff notification for a standard lead submission.
pub fn lead_notification(lead: &Lead) -> (String, String) {
    let business = if lead.business_name.is_empty() {
        "No Business Name"
    } else {
        &lead.business_name
    };
    let subject = format!("New Lead: {} - {}", lead.contact_person, business);

    let body = format!(
        "\nNew Lead Submission Received\n\n\
         Contact Information:\n\
         - Name: {}\n\
         - Position: {}\n\
         - Email: {}\n\
         - Phone: {}\n\n\
         Business Information:\n\
         - Business Name: {}\n\
         - Industry: {}\n\
         - Business Structure: {}\n\
         - Years in Operation: {}\n\
         - Employees: {}\n\n\
         Goals:\n\
         - Short-term: {}\n\
         - Long-term: {}\n\n\
         Challenges: {}\n\n\
         Services Seeking: {}\n\n\
         Additional Information: {}\n\n\
         Submitted at: {}\n",
        lead.contact_person,
        or_not_provided(&lead.position),
        lead.email,
        or_not_provided(&lead.phone),
        or_not_provided(&lead.business_name),
        or_not_provided(&lead.industry),
        lead.business_structure,
        lead.years_operation,
        lead.employees,
        lead.short_term_goals,
        lead.long_term_goals,
        lead.challenges,
        lead.services_seeking,
        lead.additional_info,
        format_timestamp(lead.created_at),
    );

    (subject, body)
}

/// Thank-you email back to the person who submitted the form.
pub fn lead_confirmation(lead: &Lead, company: &str) -> (String, String) {
    let subject = format!("Thank You for Contacting {}", company);

    let body = format!(
        "\nDear {},\n\n\
         Thank you for reaching out to {}! We have received your business \
         information and our team will review it carefully.\n\n\
         We'll get back to you within 24 hours to discuss how we can help grow \
         your business.\n\n\
         Best regards,\n\
         {} Team\n",
        lead.contact_person, company, company,
    );

    (subject, body)
}

/// Staff notification for a booking, with optional payment facts.
pub fn booking_staff(
    lead: &Lead,
    appointment: &AppointmentDetails,
    payment: Option<&PaymentSummary>,
) -> (String, String) {
    let subject = format!("New Booking: {} - {}", lead.contact_person, appointment.title);

    let payment_lines = match payment {
        Some(p) => format!(
            "- Payment Status: {}\n- Payment ID: {}",
            p.status, p.payment_id
        ),
        None => "- Payment: Not applicable".to_string(),
    };

    let additional = if lead.additional_info.is_empty() {
        "None provided"
    } else {
        &lead.additional_info
    };

    let body = format!(
        "\nNew Booking Received\n\n\
         {d}\n\n\
         CUSTOMER INFORMATION:\n\
         {d}\n\
         - Name: {}\n\
         - Position: {}\n\
         - Email: {}\n\
         - Phone: {}\n\
         - Business Name: {}\n\
         - Business Address: {}\n\n\
         {d}\n\n\
         APPOINTMENT DETAILS:\n\
         {d}\n\
         - Service: {}\n\
         - Duration: {}\n\
         - Price: {}\n\n\
         {d}\n\n\
         PAYMENT INFORMATION:\n\
         {d}\n\
         {}\n\n\
         {d}\n\n\
         BUSINESS INFORMATION:\n\
         {d}\n\
         - Industry: {}\n\
         - Nature of Business: {}\n\
         - Business Structure: {}\n\
         - Years in Operation: {}\n\
         - Number of Employees: {}\n\
         - Locations: {}\n\
         - Services Seeking: {}\n\n\
         {d}\n\n\
         ADDITIONAL INFORMATION:\n\
         {d}\n\
         {}\n\n\
         {d}\n\n\
         Booking created at: {}\n\
         Lead ID: {}\n",
        lead.contact_person,
        or_not_provided(&lead.position),
        lead.email,
        or_not_provided(&lead.phone),
        or_not_provided(&lead.business_name),
        or_not_provided(&lead.business_address),
        appointment.title,
        appointment.duration,
        appointment.price,
        payment_lines,
        or_not_provided(&lead.industry),
        or_not_provided(&lead.nature_of_business),
        or_not_provided(&lead.business_structure),
        or_not_provided(&lead.years_operation),
        or_not_provided(&lead.employees),
        or_not_provided(&lead.locations),
        or_not_provided(&lead.services_seeking),
        additional,
        format_timestamp(lead.created_at),
        lead.id,
        d = DIVIDER,
    );

    (subject, body)
}

/// Booking confirmation for the customer. Free consultations get a
/// dedicated line instead of an amount.
pub fn booking_customer(
    lead: &Lead,
    appointment: &AppointmentDetails,
    company: &str,
) -> (String, String) {
    let subject = format!("Booking Confirmation - {}", company);

    let amount_line = if appointment.price == "Free" {
        "This is a free consultation".to_string()
    } else {
        format!("Amount Paid: {}", appointment.price)
    };

    let body = format!(
        "\nDear {},\n\n\
         Thank you for booking with {}!\n\n\
         Your booking has been confirmed:\n\n\
         Service: {}\n\
         Duration: {}\n\
         {}\n\n\
         Our team will contact you shortly to finalize the details and schedule \
         your appointment.\n\n\
         If you have any questions, please don't hesitate to contact us.\n\n\
         Best regards,\n\
         {} Team\n",
        lead.contact_person, company, appointment.title, appointment.duration, amount_line, company,
    );

    (subject, body)
}

/// Staff notification for a webinar registration.
pub fn webinar_staff(lead: &Lead, webinar_time: &str) -> (String, String) {
    let subject = format!("New Webinar Registration: {}", lead.contact_person);

    let body = format!(
        "\nNew Webinar Registration Received\n\n\
         {d}\n\n\
         ATTENDEE INFORMATION:\n\
         {d}\n\
         - Name: {}\n\
         - Email: {}\n\
         - Phone: {}\n\
         - Business Name: {}\n\n\
         {d}\n\n\
         Webinar time: {}\n\
         Registered at: {}\n\
         Lead ID: {}\n",
        lead.contact_person,
        lead.email,
        or_not_provided(&lead.phone),
        or_not_provided(&lead.business_name),
        webinar_time,
        format_timestamp(lead.created_at),
        lead.id,
        d = DIVIDER,
    );

    (subject, body)
}

/// Confirmation for the webinar attendee.
pub fn webinar_customer(lead: &Lead, webinar_time: &str, company: &str) -> (String, String) {
    let subject = format!("Webinar Registration Confirmed - {}", company);

    let body = format!(
        "\nDear {},\n\n\
         Thank you for registering for our webinar!\n\n\
         Your place is confirmed. The webinar starts at {} and joining details \
         will be sent to this email address before the session.\n\n\
         If you have any questions, please don't hesitate to contact us.\n\n\
         Best regards,\n\
         {} Team\n",
        lead.contact_person, webinar_time, company,
    );

    (subject, body)
}

/// Careers notification carrying the applicant details. The CV is attached
/// by the sender.
pub fn job_application(application: &JobApplication, submitted_at: i64) -> (String, String) {
    let subject = format!(
        "New Job Application: {} - {}",
        application.full_name, application.position
    );

    let body = format!(
        "\nNew Job Application Received\n\n\
         {d}\n\n\
         APPLICANT INFORMATION:\n\
         {d}\n\
         - Full Name: {}\n\
         - Email: {}\n\
         - Phone: {}\n\
         - Position Applied For: {}\n\n\
         {d}\n\n\
         COVER LETTER:\n\
         {d}\n\
         {}\n\n\
         {d}\n\n\
         CV/Resume attached to this email.\n\n\
         Application submitted at: {}\n",
        application.full_name,
        application.email,
        application.phone,
        application.position,
        application.cover_letter,
        format_timestamp(submitted_at),
        d = DIVIDER,
    );

    (subject, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_lead() -> Lead {
        Lead {
            id: 7,
            business_name: "Acme Ltd".into(),
            contact_person: "Jane Smith".into(),
            position: String::new(),
            email: "jane@acme.test".into(),
            phone: "0123456789".into(),
            business_address: String::new(),
            nature_of_business: String::new(),
            business_activities: String::new(),
            industry: "Retail".into(),
            products_services: String::new(),
            target_market: String::new(),
            years_operation: "5".into(),
            business_structure: "Limited Company".into(),
            employees: "10".into(),
            locations: String::new(),
            short_term_goals: "Booking: Consultation".into(),
            long_term_goals: "Expand".into(),
            challenges: "Cash flow".into(),
            services_seeking: "Consultation".into(),
            additional_info: "Appointment booking - 30 mins - Free".into(),
            company_size: String::new(),
            annual_revenue: String::new(),
            preferred_contact_method: String::new(),
            urgency_level: String::new(),
            budget_range: String::new(),
            created_at: 1_756_000_000,
            is_contacted: false,
            notes: String::new(),
        }
    }

    #[test]
    fn lead_notification_subject_uses_business_name() {
        let (subject, body) = lead_notification(&sample_lead());
        assert_eq!(subject, "New Lead: Jane Smith - Acme Ltd");
        assert!(body.contains("- Position: Not provided"));
        assert!(body.contains("- Phone: 0123456789"));
    }

    #[test]
    fn lead_notification_subject_without_business_name() {
        let mut lead = sample_lead();
        lead.business_name = String::new();
        let (subject, body) = lead_notification(&lead);
        assert_eq!(subject, "New Lead: Jane Smith - No Business Name");
        assert!(body.contains("- Business Name: Not provided"));
    }

    #[test]
    fn booking_staff_without_payment_says_not_applicable() {
        let appt = AppointmentDetails {
            title: "Consultation".into(),
            duration: "30 mins".into(),
            price: "Free".into(),
        };
        let (subject, body) = booking_staff(&sample_lead(), &appt, None);
        assert_eq!(subject, "New Booking: Jane Smith - Consultation");
        assert!(body.contains("- Payment: Not applicable"));
        assert!(body.contains("Lead ID: 7"));
    }

    #[test]
    fn booking_staff_with_payment_lists_status_and_id() {
        let appt = AppointmentDetails {
            title: "Consultation".into(),
            duration: "1 hour".into(),
            price: "£80.00".into(),
        };
        let payment = PaymentSummary {
            status: "completed".into(),
            payment_id: 42,
        };
        let (_, body) = booking_staff(&sample_lead(), &appt, Some(&payment));
        assert!(body.contains("- Payment Status: completed"));
        assert!(body.contains("- Payment ID: 42"));
    }

    #[test]
    fn booking_customer_free_consultation_line() {
        let appt = AppointmentDetails {
            title: "Consultation".into(),
            duration: "30 mins".into(),
            price: "Free".into(),
        };
        let (_, body) = booking_customer(&sample_lead(), &appt, "Brince Solutions");
        assert!(body.contains("This is a free consultation"));
        assert!(!body.contains("Amount Paid:"));
    }

    #[test]
    fn booking_customer_paid_shows_amount() {
        let appt = AppointmentDetails {
            title: "Consultation".into(),
            duration: "1 hour".into(),
            price: "£80.00".into(),
        };
        let (_, body) = booking_customer(&sample_lead(), &appt, "Brince Solutions");
        assert!(body.contains("Amount Paid: £80.00"));
        assert!(!body.contains("free consultation"));
    }

    #[test]
    fn webinar_customer_includes_time() {
        let (subject, body) = webinar_customer(&sample_lead(), "6PM", "Brince Solutions");
        assert_eq!(subject, "Webinar Registration Confirmed - Brince Solutions");
        assert!(body.contains("starts at 6PM"));
    }

    #[test]
    fn job_application_body_carries_cover_letter() {
        let app = JobApplication {
            full_name: "Sam Jones".into(),
            email: "sam@example.test".into(),
            phone: "07000000000".into(),
            position: "Account Manager".into(),
            cover_letter: "I would be a great fit.".into(),
        };
        let (subject, body) = job_application(&app, 1_756_000_000);
        assert_eq!(subject, "New Job Application: Sam Jones - Account Manager");
        assert!(body.contains("I would be a great fit."));
        assert!(body.contains("CV/Resume attached to this email."));
    }
}
