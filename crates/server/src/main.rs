use std::sync::Arc;

use axum::http::{HeaderName, Method};
use streams_server::{config::Config, routes, store, AppState};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

#[tokio::main]
async fn main() {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "streams_server=info".into()),
        )
        .init();

    let config = Config::from_env();

    // Restore the workspace from the last snapshot
    let workspace = store::load_snapshot(&config.snapshot_path)
        .expect("Failed to load workspace snapshot");

    let state = Arc::new(AppState::new(config.clone(), workspace));

    // Build router
    let app = routes::build_router(state).layer(
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::mirror_request())
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([
                HeaderName::from_static("content-type"),
                HeaderName::from_static("authorization"),
            ])
            .allow_credentials(true),
    );

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await.expect("Failed to bind");

    tracing::info!("Streams server running on {}", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
