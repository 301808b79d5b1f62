use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Directory fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Directory source returned status {0}")]
    UpstreamStatus(u16),

    #[error("Directory document is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Directory document must be a JSON array")]
    NotAnArray,

    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),

    #[error("Invalid filter operation: {0}")]
    InvalidOperation(String),

    #[error("Template rendering failed: {0}")]
    Render(#[from] askama::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for DirectoryError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            DirectoryError::InvalidQuery(_) => {
                (StatusCode::BAD_REQUEST, "invalid-query", self.to_string())
            }
            DirectoryError::InvalidOperation(_) => {
                (StatusCode::BAD_REQUEST, "invalid-operation", self.to_string())
            }
            DirectoryError::Fetch(_)
            | DirectoryError::UpstreamStatus(_)
            | DirectoryError::Decode(_)
            | DirectoryError::NotAnArray => (
                StatusCode::BAD_GATEWAY,
                "upstream",
                "Directory source unavailable".to_string(),
            ),
            DirectoryError::Render(_) | DirectoryError::Internal(_) => {
                tracing::error!(error = %self, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "exception",
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(error_body(code, &message))).into_response()
    }
}

fn error_body(code: &str, message: &str) -> serde_json::Value {
    json!({
        "error": {
            "code": code,
            "message": message
        }
    })
}

pub type Result<T> = std::result::Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_query_is_bad_request() {
        let response = DirectoryError::InvalidQuery("sort=price".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_upstream_errors_hide_details() {
        let response = DirectoryError::UpstreamStatus(404).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }
}
