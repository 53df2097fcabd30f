use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A persisted lead-generation form submission.
///
/// Contact and business fields are written once at submission time and never
/// mutated by the flow; only `is_contacted` and `notes` change afterwards
/// (staff-side).
#[derive(Debug, Clone, Serialize)]
pub struct Lead {
    pub id: i64,

    // Basic information
    pub business_name: String,
    pub contact_person: String,
    pub position: String,
    pub email: String,
    pub phone: String,
    pub business_address: String,

    // Business details
    pub nature_of_business: String,
    pub business_activities: String,
    pub industry: String,
    pub products_services: String,
    pub target_market: String,

    // Company information
    pub years_operation: String,
    pub business_structure: String,
    pub employees: String,
    pub locations: String,

    // Goals and challenges
    pub short_term_goals: String,
    pub long_term_goals: String,
    pub challenges: String,
    pub services_seeking: String,
    pub additional_info: String,

    // Lead-generation extras
    pub company_size: String,
    pub annual_revenue: String,
    pub preferred_contact_method: String,
    pub urgency_level: String,
    pub budget_range: String,

    // Metadata
    pub created_at: i64,
    pub is_contacted: bool,
    pub notes: String,
}

/// Incoming lead payload. The frontend sends display-friendly camelCase
/// names; storage uses snake_case, so the serde renames below are the
/// explicit field-name mapping between the two conventions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLead {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub contact_person: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub business_address: String,

    #[serde(default)]
    pub nature_of_business: String,
    #[serde(default)]
    pub business_activities: String,
    #[serde(default)]
    pub industry: String,
    #[serde(default)]
    pub products_services: String,
    #[serde(default)]
    pub target_market: String,

    #[serde(default)]
    pub years_operation: String,
    #[serde(default)]
    pub business_structure: String,
    #[serde(default)]
    pub employees: String,
    #[serde(default)]
    pub locations: String,

    #[serde(default)]
    pub short_term_goals: String,
    #[serde(default)]
    pub long_term_goals: String,
    #[serde(default)]
    pub challenges: String,
    #[serde(default)]
    pub services_seeking: String,
    #[serde(default)]
    pub additional_info: String,

    #[serde(default)]
    pub company_size: String,
    #[serde(default)]
    pub annual_revenue: String,
    #[serde(default)]
    pub preferred_contact_method: String,
    #[serde(default)]
    pub urgency_level: String,
    #[serde(default)]
    pub budget_range: String,
}

impl CreateLead {
    /// Check required fields. Error keys use the display (camelCase) names
    /// the client submitted under.
    pub fn validate(&self) -> std::result::Result<(), BTreeMap<String, String>> {
        let required: [(&str, &str); 8] = [
            ("contactPerson", &self.contact_person),
            ("email", &self.email),
            ("yearsOperation", &self.years_operation),
            ("businessStructure", &self.business_structure),
            ("shortTermGoals", &self.short_term_goals),
            ("longTermGoals", &self.long_term_goals),
            ("servicesSeeking", &self.services_seeking),
            ("additionalInfo", &self.additional_info),
        ];

        let mut errors = BTreeMap::new();
        for (field, value) in required {
            if value.trim().is_empty() {
                errors.insert(field.to_string(), "This field is required.".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> CreateLead {
        CreateLead {
            contact_person: "Jane Doe".into(),
            email: "jane@example.com".into(),
            years_operation: "5".into(),
            business_structure: "Ltd".into(),
            short_term_goals: "Grow revenue".into(),
            long_term_goals: "Expand".into(),
            services_seeking: "Consulting".into(),
            additional_info: "None".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn missing_required_field_reported_by_display_name() {
        let mut lead = valid();
        lead.contact_person = "  ".into();
        let errors = lead.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("contactPerson"));
    }

    #[test]
    fn all_missing_fields_reported() {
        let errors = CreateLead::default().validate().unwrap_err();
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn camel_case_names_deserialize() {
        let lead: CreateLead = serde_json::from_value(serde_json::json!({
            "contactPerson": "Jane",
            "email": "jane@example.com",
            "yearsOperation": "2",
            "businessStructure": "Sole trader",
            "shortTermGoals": "Booking: Consultation",
            "longTermGoals": "Growth",
            "servicesSeeking": "Consultation",
            "additionalInfo": "Appointment booking - 30 mins - Free",
        }))
        .unwrap();
        assert_eq!(lead.contact_person, "Jane");
        assert_eq!(lead.additional_info, "Appointment booking - 30 mins - Free");
        assert!(lead.validate().is_ok());
    }
}
