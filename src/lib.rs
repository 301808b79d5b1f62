pub mod api;
pub mod config;
pub mod directory;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod search;
pub mod store;
