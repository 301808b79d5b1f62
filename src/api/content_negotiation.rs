use askama::Template;
use axum::http::{HeaderMap, Uri};

use crate::search::query_string::parse_pairs;
use crate::search::{
    ActiveFilters, ConsultationMode, FilterState, Listing, SortKey, SpecialtyFacets,
};

/// Placeholder shown for practitioners without a photo.
pub const PLACEHOLDER_PHOTO: &str = "https://via.placeholder.com/80";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Json,
}

/// Determine the preferred response format based on the Accept header.
pub fn preferred_format(headers: &HeaderMap) -> ResponseFormat {
    if let Some(accept) = headers.get("accept").and_then(|a| a.to_str().ok()) {
        if accept.contains("text/html") {
            return ResponseFormat::Html;
        }
    }
    ResponseFormat::Json
}

/// `_format=html|json` in the query overrides the Accept header.
pub fn preferred_format_with_query(uri: &Uri, headers: &HeaderMap) -> ResponseFormat {
    let requested = uri.query().and_then(|q| {
        parse_pairs(q)
            .into_iter()
            .rev()
            .find(|(k, _)| k == "_format")
            .map(|(_, v)| v)
    });
    match requested.as_deref() {
        Some("html") => ResponseFormat::Html,
        Some("json") => ResponseFormat::Json,
        _ => preferred_format(headers),
    }
}

#[derive(Template)]
#[template(path = "directory.html")]
pub struct DirectoryPage {
    pub loading: bool,
    pub state_query: String,
    pub state_params: Vec<QueryParam>,
    pub draft: String,
    pub suggestions: Vec<DoctorRow>,
    pub sort_fees: bool,
    pub sort_experience: bool,
    pub consult_video: bool,
    pub consult_clinic: bool,
    pub consult_all: bool,
    pub facet_term: String,
    pub facets: Vec<FacetRow>,
    pub active: ActiveFilters,
    pub doctors: Vec<DoctorRow>,
}

/// One decoded query parameter, re-emitted as a hidden form field.
#[derive(Clone)]
pub struct QueryParam {
    pub name: String,
    pub value: String,
}

#[derive(Clone)]
pub struct FacetRow {
    pub name: String,
    pub test_id: String,
    pub checked: bool,
}

#[derive(Clone)]
pub struct DoctorRow {
    pub key: String,
    pub name: String,
    pub photo: String,
    pub specialities: String,
    pub experience: String,
    pub languages: String,
    pub clinic_name: String,
    pub location: String,
    pub fees: String,
}

impl DoctorRow {
    pub fn from_listing(listing: &Listing<'_>) -> Self {
        let p = listing.practitioner;
        Self {
            key: listing.key(),
            name: p.name.clone(),
            photo: p.photo.clone().unwrap_or_else(|| PLACEHOLDER_PHOTO.to_string()),
            specialities: p.speciality_names().collect::<Vec<_>>().join(", "),
            experience: p.experience.clone(),
            languages: p.languages.as_ref().map(|l| l.join(", ")).unwrap_or_default(),
            clinic_name: p.clinic.as_ref().map(|c| c.name.clone()).unwrap_or_default(),
            location: p.location_line().unwrap_or_default(),
            fees: p.fees.clone(),
        }
    }
}

pub struct PageInput<'a> {
    pub state: &'a FilterState,
    pub view: Option<&'a [Listing<'a>]>,
    pub draft: &'a str,
    pub suggestions: &'a [Listing<'a>],
    pub facets: Option<&'a SpecialtyFacets>,
    pub facet_term: &'a str,
}

impl DirectoryPage {
    pub fn build(input: PageInput<'_>) -> Self {
        let state = input.state;
        let facets: Vec<FacetRow> = input
            .facets
            .map(|f| {
                f.matching(input.facet_term)
                    .into_iter()
                    .map(|facet| FacetRow {
                        name: facet.name.clone(),
                        test_id: facet.test_id.clone(),
                        checked: state.has_specialty(&facet.name),
                    })
                    .collect()
            })
            .unwrap_or_default();

        let state_query = state.to_query();
        let state_params: Vec<QueryParam> = parse_pairs(&state_query)
            .into_iter()
            .map(|(name, value)| QueryParam { name, value })
            .collect();

        Self {
            loading: input.view.is_none(),
            state_query,
            state_params,
            draft: input.draft.to_string(),
            suggestions: input.suggestions.iter().map(DoctorRow::from_listing).collect(),
            sort_fees: state.sort == Some(SortKey::Fees),
            sort_experience: state.sort == Some(SortKey::Experience),
            consult_video: state.consultation == Some(ConsultationMode::Video),
            consult_clinic: state.consultation == Some(ConsultationMode::Clinic),
            consult_all: state.consultation.is_none(),
            facet_term: input.facet_term.to_string(),
            facets,
            active: ActiveFilters::of(state, input.facet_term),
            doctors: input
                .view
                .unwrap_or_default()
                .iter()
                .map(DoctorRow::from_listing)
                .collect(),
        }
    }
}
