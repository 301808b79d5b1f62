use axum::{
    response::{IntoResponse, Redirect, Response},
    Form,
};
use serde::Deserialize;

use super::directory::canonical_location;
use crate::error::{DirectoryError, Result};
use crate::search::{ConsultationMode, Dimension, SortKey};
use crate::store::{FilterStore, MemoryUrl, UrlQuery};

/// Form posted by the page's filter controls.
#[derive(Debug, Deserialize)]
pub struct FilterForm {
    /// Encoded state the page was rendered with.
    #[serde(default)]
    pub state: String,
    pub op: String,
    pub value: Option<String>,
    pub checked: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOperation {
    SetSearch(String),
    SetConsultation(Option<ConsultationMode>),
    ToggleSpecialty { name: String, checked: bool },
    SetSort(Option<SortKey>),
    Clear(Dimension),
    ClearAll,
}

fn parse_optional<T>(value: Option<&str>, parse: fn(&str) -> Option<T>, what: &str) -> Result<Option<T>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => parse(v)
            .map(Some)
            .ok_or_else(|| DirectoryError::InvalidOperation(format!("unknown {} '{}'", what, v))),
    }
}

impl FilterOperation {
    pub fn parse(op: &str, value: Option<&str>, checked: Option<&str>) -> Result<Self> {
        let operation = match op {
            "set-search" => FilterOperation::SetSearch(value.unwrap_or("").to_string()),
            "set-consultation" => FilterOperation::SetConsultation(parse_optional(
                value,
                ConsultationMode::parse,
                "consultation mode",
            )?),
            "toggle-specialty" => {
                let name = value
                    .filter(|v| !v.trim().is_empty())
                    .ok_or_else(|| {
                        DirectoryError::InvalidOperation("toggle-specialty needs a value".to_string())
                    })?
                    .to_string();
                let checked = matches!(checked, Some("true") | Some("on"));
                FilterOperation::ToggleSpecialty { name, checked }
            }
            "set-sort" => FilterOperation::SetSort(parse_optional(value, SortKey::parse, "sort key")?),
            "clear-search" => FilterOperation::Clear(Dimension::Query),
            "clear-consultation" => FilterOperation::Clear(Dimension::Consultation),
            "clear-specialties" => FilterOperation::Clear(Dimension::Specialties),
            "clear-sort" => FilterOperation::Clear(Dimension::Sort),
            "clear-all" => FilterOperation::ClearAll,
            other => {
                return Err(DirectoryError::InvalidOperation(format!(
                    "unknown operation '{}'",
                    other
                )))
            }
        };
        Ok(operation)
    }

    /// Applies the operation; returns whether the state changed.
    pub fn apply<U: UrlQuery>(self, store: &mut FilterStore<U>) -> bool {
        match self {
            FilterOperation::SetSearch(query) => store.set_query(query),
            FilterOperation::SetConsultation(mode) => store.set_consultation(mode),
            FilterOperation::ToggleSpecialty { name, checked } => {
                store.toggle_specialty(&name, checked)
            }
            FilterOperation::SetSort(sort) => store.set_sort(sort),
            FilterOperation::Clear(dimension) => store.clear(dimension),
            FilterOperation::ClearAll => store.clear_all(),
        }
    }
}

/// Applies one filter control change and redirects to the resulting URL.
pub async fn apply_filter(Form(form): Form<FilterForm>) -> Result<Response> {
    let operation = FilterOperation::parse(&form.op, form.value.as_deref(), form.checked.as_deref())?;

    let mut store = FilterStore::hydrate(MemoryUrl::new(form.state));
    let changed = operation.clone().apply(&mut store);
    tracing::debug!(?operation, changed, "Applied filter operation");

    Ok(Redirect::to(&canonical_location(store.state())).into_response())
}
