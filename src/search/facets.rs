use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use super::FilterState;
use crate::models::Practitioner;

const SPECIALTY_TEST_ID_PREFIX: &str = "filter-specialty-";

/// Test-automation identifier of a specialty checkbox: every whitespace run becomes `-`.
pub fn specialty_test_id(name: &str) -> String {
    let mut id = String::with_capacity(SPECIALTY_TEST_ID_PREFIX.len() + name.len());
    id.push_str(SPECIALTY_TEST_ID_PREFIX);

    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                id.push('-');
            }
            in_whitespace = true;
        } else {
            id.push(ch);
            in_whitespace = false;
        }
    }
    id
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecialtyFacet {
    pub name: String,
    pub test_id: String,
}

/// Distinct specialty names across the directory, sorted.
#[derive(Debug, Clone, Default)]
pub struct SpecialtyFacets {
    facets: Vec<SpecialtyFacet>,
}

impl SpecialtyFacets {
    pub fn build(practitioners: &[Practitioner]) -> Self {
        let names: BTreeSet<&str> = practitioners
            .iter()
            .flat_map(|p| p.speciality_names())
            .collect();

        let mut seen: HashMap<String, &str> = HashMap::new();
        let facets = names
            .into_iter()
            .map(|name| {
                let test_id = specialty_test_id(name);
                if let Some(other) = seen.insert(test_id.clone(), name) {
                    tracing::warn!(
                        test_id = %test_id,
                        first = %other,
                        second = %name,
                        "Specialty names share a test identifier"
                    );
                }
                SpecialtyFacet {
                    name: name.to_string(),
                    test_id,
                }
            })
            .collect();

        Self { facets }
    }

    pub fn all(&self) -> &[SpecialtyFacet] {
        &self.facets
    }

    /// Facets whose name contains `term`, case-insensitively. A blank term keeps all.
    pub fn matching(&self, term: &str) -> Vec<&SpecialtyFacet> {
        if term.trim().is_empty() {
            return self.facets.iter().collect();
        }
        let term = term.to_lowercase();
        self.facets
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&term))
            .collect()
    }
}

/// Which per-section "Clear" controls apply for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActiveFilters {
    pub sort: bool,
    pub specialties: bool,
    pub consultation: bool,
    pub any: bool,
}

impl ActiveFilters {
    /// `facet_term` is the specialty search box text, which also enables its Clear.
    pub fn of(state: &FilterState, facet_term: &str) -> Self {
        let sort = state.sort.is_some();
        let consultation = state.consultation.is_some();
        let selected = !state.specialties().is_empty();
        Self {
            sort,
            specialties: selected || !facet_term.is_empty(),
            consultation,
            any: sort || selected || consultation,
        }
    }
}
