use serde::Serialize;

pub mod derive;
pub mod facets;
pub mod query_string;
pub mod suggest;

pub use derive::{derive_view, Listing};
pub use facets::{specialty_test_id, ActiveFilters, SpecialtyFacets};
pub use suggest::{suggest, SearchBox, SearchPhase, SUGGESTION_LIMIT};

/// Consultation mode filter. Video and clinic are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsultationMode {
    Video,
    Clinic,
}

impl ConsultationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationMode::Video => "video",
            ConsultationMode::Clinic => "clinic",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "video" => Some(ConsultationMode::Video),
            "clinic" => Some(ConsultationMode::Clinic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Fee, lowest first.
    Fees,
    /// Years of experience, most first.
    Experience,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }
}

/// One of the four independent filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Query,
    Consultation,
    Specialties,
    Sort,
}

/// The user-controlled selection: free-text query, consultation mode, selected
/// specialties and sort key.
///
/// Specialties behave as a set that remembers insertion order for display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterState {
    pub query: String,
    pub consultation: Option<ConsultationMode>,
    specialties: Vec<String>,
    pub sort: Option<SortKey>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn specialties(&self) -> &[String] {
        &self.specialties
    }

    /// Selection compares names case-insensitively, like specialty matching does.
    pub fn has_specialty(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.specialties.iter().any(|s| s.to_lowercase() == name)
    }

    /// Adds a specialty unless it is blank or already selected in any letter case.
    pub fn insert_specialty(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || self.has_specialty(name) {
            return false;
        }
        self.specialties.push(name.to_string());
        true
    }

    pub fn remove_specialty(&mut self, name: &str) -> bool {
        let name = name.to_lowercase();
        let before = self.specialties.len();
        self.specialties.retain(|s| s.to_lowercase() != name);
        self.specialties.len() != before
    }

    pub fn clear_specialties(&mut self) -> bool {
        if self.specialties.is_empty() {
            return false;
        }
        self.specialties.clear();
        true
    }

    /// True when every dimension holds its default.
    pub fn is_default(&self) -> bool {
        *self == FilterState::default()
    }
}
