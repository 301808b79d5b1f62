use std::cmp::Reverse;

use super::{ConsultationMode, FilterState, SortKey};
use crate::models::Practitioner;

/// A practitioner in a derived view, together with its position in the source directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listing<'a> {
    pub position: usize,
    pub practitioner: &'a Practitioner,
}

impl<'a> Listing<'a> {
    /// Stable key: record id, falling back to the source position.
    pub fn key(&self) -> String {
        self.practitioner.key(self.position)
    }
}

pub fn matches_query(practitioner: &Practitioner, state: &FilterState) -> bool {
    if state.query.is_empty() {
        return true;
    }
    practitioner.name_contains(&state.query.to_lowercase())
}

pub fn matches_consultation(practitioner: &Practitioner, state: &FilterState) -> bool {
    match state.consultation {
        Some(ConsultationMode::Video) => practitioner.video_consult,
        Some(ConsultationMode::Clinic) => practitioner.in_clinic,
        None => true,
    }
}

/// Union match: any selected specialty is enough.
pub fn matches_specialties(practitioner: &Practitioner, state: &FilterState) -> bool {
    let selected = state.specialties();
    selected.is_empty() || selected.iter().any(|s| practitioner.has_speciality(s))
}

/// Sorts in place. `sort_by_key` is stable, so ties keep their incoming order.
pub fn sort_listings(listings: &mut [Listing<'_>], sort: Option<SortKey>) {
    match sort {
        // Unparseable fees go after every valid fee.
        Some(SortKey::Fees) => listings.sort_by_key(|l| match l.practitioner.fee_amount() {
            Some(amount) => (false, amount),
            None => (true, 0),
        }),
        Some(SortKey::Experience) => {
            listings.sort_by_key(|l| Reverse(l.practitioner.experience_years()))
        }
        None => {}
    }
}

/// Filters and sorts the directory for the given state. Recomputed from scratch on every
/// call; the directory itself is never modified.
pub fn derive_view<'a>(practitioners: &'a [Practitioner], state: &FilterState) -> Vec<Listing<'a>> {
    let mut view: Vec<Listing<'a>> = practitioners
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_query(p, state))
        .filter(|(_, p)| matches_consultation(p, state))
        .filter(|(_, p)| matches_specialties(p, state))
        .map(|(position, practitioner)| Listing {
            position,
            practitioner,
        })
        .collect();

    sort_listings(&mut view, state.sort);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Speciality;

    fn doctor(name: &str, fees: &str, experience: &str, video: bool, clinic: bool, specs: &[&str]) -> Practitioner {
        Practitioner {
            name: name.to_string(),
            fees: fees.to_string(),
            experience: experience.to_string(),
            video_consult: video,
            in_clinic: clinic,
            specialities: specs
                .iter()
                .map(|s| Speciality { name: s.to_string() })
                .collect(),
            ..Default::default()
        }
    }

    fn names(view: &[Listing<'_>]) -> Vec<String> {
        view.iter().map(|l| l.practitioner.name.clone()).collect()
    }

    fn directory() -> Vec<Practitioner> {
        vec![
            doctor("Dr. A", "₹ 100", "5 Years of experience", true, false, &["Cardiologist"]),
            doctor("Dr. B", "₹ 50", "10 Years of experience", false, true, &["Dermatologist"]),
        ]
    }

    #[test]
    fn test_no_filters_keeps_source_order() {
        let dir = directory();
        let view = derive_view(&dir, &FilterState::default());
        assert_eq!(names(&view), ["Dr. A", "Dr. B"]);
        assert_eq!(view[1].key(), "1");
    }

    #[test]
    fn test_consultation_filter() {
        let dir = directory();
        let mut state = FilterState::default();
        state.consultation = Some(ConsultationMode::Video);
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. A"]);
        state.consultation = Some(ConsultationMode::Clinic);
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. B"]);
    }

    #[test]
    fn test_sort_by_fees_ascending() {
        let dir = directory();
        let mut state = FilterState::default();
        state.sort = Some(SortKey::Fees);
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. B", "Dr. A"]);
    }

    #[test]
    fn test_sort_by_experience_descending() {
        let dir = directory();
        let mut state = FilterState::default();
        state.sort = Some(SortKey::Experience);
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. B", "Dr. A"]);
    }

    #[test]
    fn test_specialty_filter_is_union() {
        let dir = directory();
        let mut state = FilterState::default();
        state.insert_specialty("cardiologist");
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. A"]);
        state.insert_specialty("Dermatologist");
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. A", "Dr. B"]);
    }

    #[test]
    fn test_query_is_case_insensitive_substring() {
        let dir = directory();
        let mut state = FilterState::default();
        state.query = "dr. b".to_string();
        assert_eq!(names(&derive_view(&dir, &state)), ["Dr. B"]);
        state.query = "zzz".to_string();
        assert!(derive_view(&dir, &state).is_empty());
    }

    #[test]
    fn test_unparseable_fees_sort_last_and_keep_order() {
        let dir = vec![
            doctor("Free 1", "Free", "", false, false, &[]),
            doctor("Paid", "₹ 900", "", false, false, &[]),
            doctor("Free 2", "", "", false, false, &[]),
            doctor("Cheap", "₹ 10", "", false, false, &[]),
        ];
        let mut state = FilterState::default();
        state.sort = Some(SortKey::Fees);
        assert_eq!(
            names(&derive_view(&dir, &state)),
            ["Cheap", "Paid", "Free 1", "Free 2"]
        );
    }

    #[test]
    fn test_experience_ties_are_stable() {
        let dir = vec![
            doctor("First", "", "7 years", false, false, &[]),
            doctor("Unknown", "", "n/a", false, false, &[]),
            doctor("Second", "", "7 yrs", false, false, &[]),
            doctor("Senior", "", "30 years", false, false, &[]),
        ];
        let mut state = FilterState::default();
        state.sort = Some(SortKey::Experience);
        assert_eq!(
            names(&derive_view(&dir, &state)),
            ["Senior", "First", "Second", "Unknown"]
        );
    }

    #[test]
    fn test_record_without_specialities_only_fails_specialty_filter() {
        let dir = vec![doctor("Dr. Plain", "", "", true, true, &[])];
        let mut state = FilterState::default();
        state.consultation = Some(ConsultationMode::Video);
        assert_eq!(derive_view(&dir, &state).len(), 1);
        state.insert_specialty("Dentist");
        assert!(derive_view(&dir, &state).is_empty());
    }
}
