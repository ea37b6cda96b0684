use std::sync::Arc;

use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use vacancy_client::FallbackFetcher;
use vacancy_core::models::ExtractionLimits;
use vacancy_server::routes;
use vacancy_server::state::{AppState, SharedFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("vacancy=info".parse()?))
        .with_target(false)
        .init();

    let api_key = std::env::var("VACANCY_API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("VACANCY_API_KEY not set, extraction endpoint is unauthenticated");
    }
    let port = std::env::var("VACANCY_SERVER_PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("0.0.0.0:{port}");

    let fetcher = SharedFetcher::new(FallbackFetcher::new()?);
    let state = Arc::new(AppState {
        fetcher,
        api_key,
        limits: ExtractionLimits::default(),
    });

    let app = routes::router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(64 * 1024));

    tracing::info!("Starting server on {addr}");
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C handler");
    tracing::info!("Shutdown signal received");
}
