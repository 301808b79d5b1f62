use askama::Template;
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue, Uri},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

use crate::api::content_negotiation::{
    preferred_format_with_query, DirectoryPage, PageInput, ResponseFormat,
};
use crate::error::Result;
use crate::extractors::FilterQuery;
use crate::models::Practitioner;
use crate::repository::PractitionerRepository;
use crate::search::{FilterState, Listing, SearchBox};

pub type SharedPractitionerRepo = Arc<PractitionerRepository>;

/// Page-only parameters that are not part of the filter state.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    /// Uncommitted search box text, used for suggestions.
    pub draft: Option<String>,
    /// Narrows the specialty checkbox list.
    pub specialty_filter: Option<String>,
}

#[derive(Serialize)]
pub struct PractitionerEntry<'a> {
    pub key: String,
    #[serde(flatten)]
    pub practitioner: &'a Practitioner,
}

impl<'a> From<&Listing<'a>> for PractitionerEntry<'a> {
    fn from(listing: &Listing<'a>) -> Self {
        Self {
            key: listing.key(),
            practitioner: listing.practitioner,
        }
    }
}

#[derive(Serialize)]
struct DirectoryResponse<'a> {
    loading: bool,
    /// Practitioners in the derived view.
    count: usize,
    /// Practitioners in the loaded directory.
    directory_total: usize,
    query: String,
    filters: &'a FilterState,
    practitioners: Vec<PractitionerEntry<'a>>,
}

/// URL the current state is reachable at.
pub fn canonical_location(state: &FilterState) -> String {
    let query = state.to_query();
    if query.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", query)
    }
}

/// Directory page: derived view for the filter state in the query string.
pub async fn directory_page(
    State(repo): State<SharedPractitionerRepo>,
    FilterQuery(state): FilterQuery,
    Query(params): Query<PageParams>,
    headers: HeaderMap,
    uri: Uri,
) -> Result<Response> {
    let view = repo.search(&state);
    let location = canonical_location(&state);

    let mut response = match preferred_format_with_query(&uri, &headers) {
        ResponseFormat::Json => {
            let practitioners: Vec<PractitionerEntry<'_>> = view
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(PractitionerEntry::from)
                .collect();
            Json(DirectoryResponse {
                loading: view.is_none(),
                count: practitioners.len(),
                directory_total: repo.practitioners().len(),
                query: state.to_query(),
                filters: &state,
                practitioners,
            })
            .into_response()
        }
        ResponseFormat::Html => {
            let mut search = SearchBox::new(&state.query);
            if let Some(draft) = params.draft.as_deref() {
                search.input(draft);
            }
            let suggestions = search.suggestions(repo.practitioners(), Instant::now());
            let facet_term = params.specialty_filter.unwrap_or_default();

            let page = DirectoryPage::build(PageInput {
                state: &state,
                view: view.as_deref(),
                draft: search.draft(),
                suggestions: &suggestions,
                facets: repo.facets(),
                facet_term: &facet_term,
            });
            Html(page.render()?).into_response()
        }
    };

    if let Ok(value) = HeaderValue::from_str(&location) {
        response
            .headers_mut()
            .insert(header::CONTENT_LOCATION, value);
    }
    Ok(response)
}
