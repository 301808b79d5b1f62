use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use doctofind::api::app;
use doctofind::config::Config;
use doctofind::directory;
use doctofind::repository::PractitionerRepository;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doctofind=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!("Starting directory server on {}", config.server_addr());

    let repo = Arc::new(PractitionerRepository::new());

    // The directory loads once in the background; pages show a loading state until then.
    let source = directory::source_for(&config.directory);
    let loader_repo = repo.clone();
    tokio::spawn(async move {
        let snapshot = directory::load(source.as_ref()).await;
        loader_repo.install(snapshot);
    });

    let app = app(repo)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.server_addr()).await?;
    tracing::info!("Listening on {}", config.server_addr());

    axum::serve(listener, app).await?;

    Ok(())
}
