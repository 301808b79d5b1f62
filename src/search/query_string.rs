//! Encoding of [`FilterState`] to and from a URL query string.
//!
//! Wire format: `search=<text>`, `consultation=<video|clinic>`, one `specialty=<name>` per
//! selected specialty, `sort=<fees|experience>`. Absent parameters mean "unset". Keys the
//! directory does not know are ignored on decode.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use super::{ConsultationMode, FilterState, SortKey};
use crate::error::{DirectoryError, Result};

/// Everything except RFC 3986 unreserved characters is escaped.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

pub const SEARCH_PARAM: &str = "search";
pub const CONSULTATION_PARAM: &str = "consultation";
pub const SPECIALTY_PARAM: &str = "specialty";
pub const SORT_PARAM: &str = "sort";

fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

fn decode_component(value: &str) -> String {
    let with_spaces = value.replace('+', " ");
    percent_decode_str(&with_spaces)
        .decode_utf8_lossy()
        .into_owned()
}

/// Splits a raw query string into decoded key/value pairs, in order.
pub fn parse_pairs(raw: &str) -> Vec<(String, String)> {
    raw.trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (decode_component(key), decode_component(value)),
            None => (decode_component(pair), String::new()),
        })
        .collect()
}

impl FilterState {
    /// Canonical query string for this state. Empty when every dimension is unset.
    pub fn to_query(&self) -> String {
        let mut params: Vec<String> = Vec::new();

        if !self.query.is_empty() {
            params.push(format!("{}={}", SEARCH_PARAM, encode_value(&self.query)));
        }
        if let Some(mode) = self.consultation {
            params.push(format!("{}={}", CONSULTATION_PARAM, mode.as_str()));
        }
        for specialty in self.specialties() {
            params.push(format!("{}={}", SPECIALTY_PARAM, encode_value(specialty)));
        }
        if let Some(sort) = self.sort {
            params.push(format!("{}={}", SORT_PARAM, sort.as_str()));
        }

        params.join("&")
    }

    /// Decodes a query string, rejecting values the directory does not understand.
    pub fn from_query(raw: &str) -> Result<Self> {
        decode(raw, true)
    }

    /// Decodes a query string, treating unrecognised values as unset.
    pub fn from_query_lossy(raw: &str) -> Self {
        match decode(raw, false) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(error = %e, "Lossy query decoding failed, using defaults");
                FilterState::default()
            }
        }
    }
}

fn decode(raw: &str, strict: bool) -> Result<FilterState> {
    let mut state = FilterState::default();

    for (key, value) in parse_pairs(raw) {
        match key.as_str() {
            SEARCH_PARAM => state.query = value,
            CONSULTATION_PARAM => {
                state.consultation = if value.is_empty() {
                    None
                } else {
                    match ConsultationMode::parse(&value) {
                        Some(mode) => Some(mode),
                        None if strict => {
                            return Err(DirectoryError::InvalidQuery(format!(
                                "consultation must be 'video' or 'clinic', got '{}'",
                                value
                            )))
                        }
                        None => {
                            tracing::debug!(value = %value, "Ignoring unknown consultation mode");
                            None
                        }
                    }
                };
            }
            SPECIALTY_PARAM => {
                state.insert_specialty(&value);
            }
            SORT_PARAM => {
                state.sort = if value.is_empty() {
                    None
                } else {
                    match SortKey::parse(&value) {
                        Some(key) => Some(key),
                        None if strict => {
                            return Err(DirectoryError::InvalidQuery(format!(
                                "sort must be 'fees' or 'experience', got '{}'",
                                value
                            )))
                        }
                        None => {
                            tracing::debug!(value = %value, "Ignoring unknown sort key");
                            None
                        }
                    }
                };
            }
            _ => {}
        }
    }

    Ok(state)
}
