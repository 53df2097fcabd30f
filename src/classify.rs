//! Submission classification.
//!
//! The booking form encodes its intent as text markers inside free-text
//! fields ("Booking:", "Appointment booking - 30 mins - Free", "Webinar
//! Registration"). This module parses those markers once, up front, into a
//! tagged [`SubmissionKind`] so the rest of the flow branches on structured
//! data instead of scattered substring checks. The exact substring semantics
//! of the form are preserved.

/// Appointment details extracted from a booking submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDetails {
    pub title: String,
    pub duration: String,
    pub price: String,
}

/// What kind of submission a lead represents, evaluated in fixed order:
/// booking detection first, then webinar registration, else standard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionKind {
    /// Plain lead: staff notification + customer confirmation.
    Standard,
    /// Webinar signup: webinar template set instead of the standard pair.
    WebinarRegistration,
    /// Appointment request. Free bookings confirm immediately; paid
    /// bookings defer confirmation until the payment webhook.
    Booking {
        details: AppointmentDetails,
        free: bool,
    },
}

const BOOKING_MARKER: &str = "Booking:";
const APPOINTMENT_MARKER: &str = "Appointment booking";
const APPOINTMENT_PREFIX: &str = "Appointment booking - ";
const FREE_MARKER: &str = "Free";
const WEBINAR_MARKER: &str = "Webinar Registration";

/// Classify a submission from its three marker-bearing fields.
pub fn classify(
    short_term_goals: &str,
    services_seeking: &str,
    additional_info: &str,
) -> SubmissionKind {
    let is_booking =
        short_term_goals.contains(BOOKING_MARKER) || additional_info.contains(APPOINTMENT_MARKER);

    if is_booking {
        let details = extract_appointment_details(services_seeking, additional_info);
        let free = short_term_goals.contains(FREE_MARKER)
            || additional_info.contains(FREE_MARKER)
            || details.price == FREE_MARKER;
        return SubmissionKind::Booking { details, free };
    }

    if services_seeking.contains(WEBINAR_MARKER) || additional_info.contains(WEBINAR_MARKER) {
        return SubmissionKind::WebinarRegistration;
    }

    SubmissionKind::Standard
}

/// Pull duration and price out of additional_info, which the booking form
/// writes as "Appointment booking - <duration> - <price>". Missing segments
/// default to "N/A". The title comes from services_seeking.
fn extract_appointment_details(services_seeking: &str, additional_info: &str) -> AppointmentDetails {
    let title = if services_seeking.is_empty() {
        "Appointment".to_string()
    } else {
        services_seeking.to_string()
    };

    let mut duration = "N/A".to_string();
    let mut price = "N/A".to_string();

    if additional_info.contains(APPOINTMENT_MARKER) {
        let stripped = additional_info.replace(APPOINTMENT_PREFIX, "");
        let mut parts = stripped.split(" - ");
        if let Some(first) = parts.next() {
            duration = first.to_string();
        }
        if let Some(second) = parts.next() {
            price = second.to_string();
        }
    }

    AppointmentDetails {
        title,
        duration,
        price,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_booking_extracts_duration_and_price() {
        let kind = classify(
            "Booking: Consultation",
            "Consultation",
            "Appointment booking - 30 mins - Free",
        );
        assert_eq!(
            kind,
            SubmissionKind::Booking {
                details: AppointmentDetails {
                    title: "Consultation".into(),
                    duration: "30 mins".into(),
                    price: "Free".into(),
                },
                free: true,
            }
        );
    }

    #[test]
    fn paid_booking_is_not_free() {
        let kind = classify(
            "Booking: Consultation",
            "Consultation",
            "Appointment booking - 30 mins - £50.00",
        );
        match kind {
            SubmissionKind::Booking { details, free } => {
                assert!(!free);
                assert_eq!(details.duration, "30 mins");
                assert_eq!(details.price, "£50.00");
            }
            other => panic!("expected booking, got {:?}", other),
        }
    }

    #[test]
    fn free_marker_in_goals_makes_booking_free() {
        let kind = classify(
            "Booking: Free discovery call",
            "Discovery call",
            "Appointment booking - 15 mins - £0.00",
        );
        assert!(matches!(kind, SubmissionKind::Booking { free: true, .. }));
    }

    #[test]
    fn appointment_marker_alone_detects_booking() {
        let kind = classify("Grow the business", "", "Appointment booking - 1 hour - £80");
        match kind {
            SubmissionKind::Booking { details, free } => {
                assert!(!free);
                assert_eq!(details.title, "Appointment");
                assert_eq!(details.duration, "1 hour");
            }
            other => panic!("expected booking, got {:?}", other),
        }
    }

    #[test]
    fn booking_without_detail_segments_defaults_to_na() {
        let kind = classify("Booking: Consultation", "Consultation", "Please call me");
        match kind {
            SubmissionKind::Booking { details, free } => {
                assert!(!free);
                assert_eq!(details.duration, "N/A");
                assert_eq!(details.price, "N/A");
            }
            other => panic!("expected booking, got {:?}", other),
        }
    }

    #[test]
    fn webinar_registration_detected() {
        let kind = classify("Learn more", "Webinar Registration", "Signed up via landing page");
        assert_eq!(kind, SubmissionKind::WebinarRegistration);
    }

    #[test]
    fn booking_takes_precedence_over_webinar() {
        let kind = classify(
            "Booking: Consultation",
            "Webinar Registration",
            "Appointment booking - 30 mins - Free",
        );
        assert!(matches!(kind, SubmissionKind::Booking { .. }));
    }

    #[test]
    fn plain_lead_is_standard() {
        let kind = classify("Grow revenue", "Marketing support", "Found you on Google");
        assert_eq!(kind, SubmissionKind::Standard);
    }
}
