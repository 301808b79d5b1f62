pub mod content_negotiation;
pub mod handlers;
pub mod routes;

pub use routes::{app, directory_routes, health_routes, search_routes};
