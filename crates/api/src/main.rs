//! Octoboard API Server

use axum::{routing::get, Router};
use github::GitHubClient;
use processor::{RefreshService, SnapshotCache};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("octoboard=debug".parse()?)
                .add_directive("api=debug".parse()?),
        )
        .init();

    info!("📊 Starting Octoboard API");

    // Load configuration
    let config = common::Config::from_env();
    let token = config
        .github_token
        .clone()
        .ok_or_else(|| anyhow::anyhow!("GITHUB_TOKEN is required"))?;

    let client = Arc::new(GitHubClient::new(token));
    let cache = Arc::new(SnapshotCache::new());

    // Start background refresh (if enabled)
    if config.refresh_interval_mins > 0 {
        let refresh = RefreshService::new(client.clone(), cache.clone(), config.clone());
        tokio::spawn(async move {
            refresh.run().await;
        });
        info!(
            "📡 Background refresh enabled (every {} minutes)",
            config.refresh_interval_mins
        );
    } else {
        info!("📡 Background refresh disabled (REFRESH_INTERVAL_MINS=0)");
    }

    // Create app state
    let state = Arc::new(AppState::new(config.clone(), client, cache));

    // Build router with state
    let app = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/dashboard", get(routes::dashboard::get))
        .route("/api/streak", get(routes::streak::get))
        .route("/api/stats", get(routes::stats::get))
        .route("/api/achievements", get(routes::achievements::get))
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = format!("{}:{}", config.host, config.port);
    info!("🚀 Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
