use axum::{extract::State, http::StatusCode, Json};
use serde_json::{json, Value};

use super::directory::SharedPractitionerRepo;
use crate::directory::LoadOutcome;

/// Health check endpoint - reports the directory load status
pub async fn health_check(State(repo): State<SharedPractitionerRepo>) -> (StatusCode, Json<Value>) {
    let Some(snapshot) = repo.snapshot() else {
        tracing::debug!("Health check - directory still loading");
        return (
            StatusCode::OK,
            Json(json!({
                "status": "starting",
                "directory": "loading",
                "version": env!("CARGO_PKG_VERSION")
            })),
        );
    };

    let (directory, source, reason) = match &snapshot.outcome {
        LoadOutcome::Loaded { source } => ("loaded", source.as_str(), None),
        LoadOutcome::Degraded { source, reason } => {
            ("degraded", source.as_str(), Some(reason.as_str()))
        }
    };

    tracing::debug!(directory, "Health check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": if snapshot.is_degraded() { "degraded" } else { "healthy" },
            "directory": directory,
            "source": source,
            "error": reason,
            "practitioners": snapshot.practitioners.len(),
            "loaded_at": snapshot.loaded_at,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint - ready once the startup load has finished, even if degraded
pub async fn readiness_check(
    State(repo): State<SharedPractitionerRepo>,
) -> (StatusCode, Json<Value>) {
    if repo.is_loaded() {
        tracing::debug!("Readiness check passed");
        (StatusCode::OK, Json(json!({ "status": "ready" })))
    } else {
        tracing::debug!("Readiness check failed - directory loading");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not ready",
                "directory": "loading"
            })),
        )
    }
}

/// Liveness check endpoint - indicates if server process is alive
pub async fn liveness_check() -> (StatusCode, Json<Value>) {
    tracing::debug!("Liveness check passed");
    (
        StatusCode::OK,
        Json(json!({
            "status": "alive"
        })),
    )
}
