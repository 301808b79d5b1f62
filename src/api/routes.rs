use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::directory::{directory_page, SharedPractitionerRepo};
use super::handlers::filters::apply_filter;
use super::handlers::health::{health_check, liveness_check, readiness_check};
use super::handlers::suggestions::{list_specialties, suggest_practitioners};
use crate::middleware::{LoggingLayer, RequestIdLayer};

pub fn directory_routes(repo: SharedPractitionerRepo) -> Router {
    Router::new()
        .route("/", get(directory_page))
        .route("/doctors", get(directory_page))
        .route("/filters", post(apply_filter))
        .with_state(repo)
}

pub fn search_routes(repo: SharedPractitionerRepo) -> Router {
    Router::new()
        .route("/api/suggestions", get(suggest_practitioners))
        .route("/api/specialties", get(list_specialties))
        .with_state(repo)
}

pub fn health_routes(repo: SharedPractitionerRepo) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/health/ready", get(readiness_check))
        .route("/health/live", get(liveness_check))
        .with_state(repo)
}

/// All routes with request-id and request-logging middleware.
pub fn app(repo: SharedPractitionerRepo) -> Router {
    Router::new()
        .merge(directory_routes(repo.clone()))
        .merge(search_routes(repo.clone()))
        .merge(health_routes(repo))
        .layer(LoggingLayer)
        .layer(RequestIdLayer)
}
