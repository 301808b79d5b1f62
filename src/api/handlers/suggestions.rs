use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use super::directory::SharedPractitionerRepo;
use crate::search::facets::SpecialtyFacet;

#[derive(Debug, Default, Deserialize)]
pub struct SuggestionParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct Suggestion {
    pub key: String,
    pub name: String,
    pub specialities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
}

/// Autocomplete for the search box: at most three name matches, directory order.
pub async fn suggest_practitioners(
    State(repo): State<SharedPractitionerRepo>,
    Query(params): Query<SuggestionParams>,
) -> Json<Vec<Suggestion>> {
    let suggestions = repo
        .suggest(&params.q)
        .iter()
        .map(|listing| Suggestion {
            key: listing.key(),
            name: listing.practitioner.name.clone(),
            specialities: listing
                .practitioner
                .speciality_names()
                .map(str::to_string)
                .collect(),
            photo: listing.practitioner.photo.clone(),
        })
        .collect();
    Json(suggestions)
}

#[derive(Debug, Default, Deserialize)]
pub struct SpecialtyParams {
    #[serde(default)]
    pub filter: String,
}

/// Specialty facets with their checkbox test identifiers. Empty while loading.
pub async fn list_specialties(
    State(repo): State<SharedPractitionerRepo>,
    Query(params): Query<SpecialtyParams>,
) -> Json<Vec<SpecialtyFacet>> {
    let facets = repo
        .facets()
        .map(|f| f.matching(&params.filter).into_iter().cloned().collect())
        .unwrap_or_default();
    Json(facets)
}
