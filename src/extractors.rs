use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::content_negotiation::{preferred_format_with_query, ResponseFormat};
use crate::error::DirectoryError;
use crate::search::FilterState;

/// Filter state decoded from the request's query string.
///
/// A page request never fails: unknown `consultation` or `sort` values are treated as unset,
/// the same way a stored URL is hydrated. JSON callers get a 400 error body for them instead.
#[derive(Debug, Clone)]
pub struct FilterQuery(pub FilterState);

#[async_trait]
impl<S> FromRequestParts<S> for FilterQuery
where
    S: Send + Sync,
{
    type Rejection = DirectoryError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw = parts.uri.query().unwrap_or("");
        match preferred_format_with_query(&parts.uri, &parts.headers) {
            ResponseFormat::Html => Ok(FilterQuery(FilterState::from_query_lossy(raw))),
            ResponseFormat::Json => FilterState::from_query(raw).map(FilterQuery),
        }
    }
}
