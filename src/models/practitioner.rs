use serde::{Deserialize, Serialize};

use super::lenient;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speciality {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, deserialize_with = "lenient::text")]
    pub locality: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub city: String,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "String::is_empty")]
    pub address_line1: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default)]
    pub address: Option<Address>,
}

/// One directory record. Read-only for the lifetime of a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Practitioner {
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::specialities")]
    pub specialities: Vec<Speciality>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub experience: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub fees: String,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub video_consult: bool,
    #[serde(default, deserialize_with = "lenient::flag")]
    pub in_clinic: bool,
    #[serde(
        default,
        deserialize_with = "lenient::optional_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub photo: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_list",
        skip_serializing_if = "Option::is_none"
    )]
    pub languages: Option<Vec<String>>,
    #[serde(
        default,
        deserialize_with = "lenient::clinic",
        skip_serializing_if = "Option::is_none"
    )]
    pub clinic: Option<Clinic>,
}

impl Practitioner {
    /// Stable key: the record id, or the position in the source collection when absent.
    pub fn key(&self, position: usize) -> String {
        self.id.clone().unwrap_or_else(|| position.to_string())
    }

    pub fn speciality_names(&self) -> impl Iterator<Item = &str> {
        self.specialities.iter().map(|s| s.name.as_str())
    }

    /// Case-insensitive exact match against one selected specialty.
    pub fn has_speciality(&self, selected: &str) -> bool {
        let selected = selected.to_lowercase();
        self.speciality_names()
            .any(|name| name.to_lowercase() == selected)
    }

    /// Fee amount with every non-digit stripped. `None` when no digits remain or the
    /// number does not fit.
    pub fn fee_amount(&self) -> Option<u64> {
        let digits: String = self.fees.chars().filter(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        digits.parse().ok()
    }

    /// First integer token in the experience descriptor, 0 when there is none.
    pub fn experience_years(&self) -> u64 {
        let token: String = self
            .experience
            .chars()
            .skip_while(|c| !c.is_ascii_digit())
            .take_while(char::is_ascii_digit)
            .collect();
        token.parse().unwrap_or(0)
    }

    pub fn name_contains(&self, needle_lower: &str) -> bool {
        self.name.to_lowercase().contains(needle_lower)
    }

    /// "locality, city" for the clinic, if one is listed.
    pub fn location_line(&self) -> Option<String> {
        let address = self.clinic.as_ref()?.address.as_ref()?;
        Some(format!("{}, {}", address.locality, address.city))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn practitioner(value: serde_json::Value) -> Practitioner {
        serde_json::from_value(value).expect("record should decode")
    }

    #[test]
    fn test_decodes_full_record() {
        let p = practitioner(json!({
            "id": "111",
            "name": "Dr. Asha Rao",
            "specialities": [{ "name": "Dentist" }, { "name": "General Physician" }],
            "experience": "13 Years of experience",
            "fees": "₹ 500",
            "video_consult": true,
            "in_clinic": false,
            "photo": "https://example.org/a.png",
            "languages": ["English", "Hindi"],
            "clinic": {
                "name": "Smile Care",
                "address": { "locality": "Indiranagar", "city": "Bangalore", "address_line1": "1 Main Rd" }
            }
        }));

        assert_eq!(p.id.as_deref(), Some("111"));
        assert_eq!(p.speciality_names().collect::<Vec<_>>(), vec!["Dentist", "General Physician"]);
        assert_eq!(p.fee_amount(), Some(500));
        assert_eq!(p.experience_years(), 13);
        assert!(p.video_consult);
        assert!(!p.in_clinic);
        assert_eq!(p.location_line().as_deref(), Some("Indiranagar, Bangalore"));
    }

    #[test]
    fn test_missing_fields_degrade_to_neutral_values() {
        let p = practitioner(json!({}));
        assert_eq!(p.name, "");
        assert!(p.specialities.is_empty());
        assert_eq!(p.fee_amount(), None);
        assert_eq!(p.experience_years(), 0);
        assert!(!p.video_consult);
        assert!(p.clinic.is_none());
        assert_eq!(p.key(7), "7");
    }

    #[test]
    fn test_wrong_shapes_do_not_fail_the_record() {
        let p = practitioner(json!({
            "id": 42,
            "name": null,
            "specialities": "Dentist",
            "fees": 300,
            "experience": ["ten"],
            "video_consult": "true",
            "in_clinic": 1,
            "languages": "English",
            "clinic": "somewhere"
        }));
        assert_eq!(p.key(0), "42");
        assert_eq!(p.name, "");
        assert!(p.specialities.is_empty());
        assert_eq!(p.fee_amount(), Some(300));
        assert_eq!(p.experience_years(), 0);
        assert!(p.video_consult);
        assert!(p.in_clinic);
        assert!(p.languages.is_none());
        assert!(p.clinic.is_none());
    }

    #[test]
    fn test_numeric_flags() {
        let p = practitioner(json!({ "video_consult": 0, "in_clinic": 2 }));
        assert!(!p.video_consult);
        assert!(p.in_clinic);

        let p = practitioner(json!({ "video_consult": "yes", "in_clinic": null }));
        assert!(!p.video_consult);
        assert!(!p.in_clinic);
    }

    #[test]
    fn test_bare_string_specialities() {
        let p = practitioner(json!({ "specialities": ["Dentist", { "name": "ENT" }, 3, ""] }));
        assert_eq!(p.speciality_names().collect::<Vec<_>>(), vec!["Dentist", "ENT"]);
    }

    #[test]
    fn test_fee_parsing() {
        let mut p = Practitioner::default();
        p.fees = "Rs. 1,200 /-".to_string();
        assert_eq!(p.fee_amount(), Some(1200));
        p.fees = "Free".to_string();
        assert_eq!(p.fee_amount(), None);
        p.fees = "9".repeat(40);
        assert_eq!(p.fee_amount(), None);
    }

    #[test]
    fn test_experience_takes_first_integer() {
        let mut p = Practitioner::default();
        p.experience = "Over 21 years, 3 clinics".to_string();
        assert_eq!(p.experience_years(), 21);
        p.experience = "Fresh graduate".to_string();
        assert_eq!(p.experience_years(), 0);
    }

    #[test]
    fn test_speciality_match_is_case_insensitive_exact() {
        let mut p = Practitioner::default();
        p.specialities = vec![Speciality { name: "General Physician".to_string() }];
        assert!(p.has_speciality("general physician"));
        assert!(!p.has_speciality("Physician"));
    }
}
