//! Artjam API server entry point.

use std::sync::Arc;

use artjam_api::config::AppConfig;
use artjam_api::error::AppError;
use artjam_api::notifier::TracingNotifier;
use artjam_api::permissions::ModeratorList;
use artjam_api::routes;
use artjam_api::state::AppState;
use artjam_core::clock::SystemClock;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Artjam API server");

    // Read configuration from environment.
    let config = AppConfig::from_env()?;
    let moderators = ModeratorList::new(config.moderators.clone());
    if moderators.is_empty() {
        tracing::warn!("ROUND_MODERATORS is empty; rounds can only end at their deadline");
    } else {
        tracing::info!(moderators = moderators.len(), "loaded round moderators");
    }

    // Build application state.
    let app_state = AppState::new(
        Arc::new(SystemClock),
        Arc::new(TracingNotifier::new(config.results_suffix.clone())),
        Arc::new(moderators),
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = Router::new()
        .merge(routes::health::router())
        .nest(
            "/api/v1/channels/{channel_id}/round",
            routes::rounds::router(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr = config.socket_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
