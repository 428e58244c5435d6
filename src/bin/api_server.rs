// API Server Binary Entry Point
//
// Purpose: Start the Axum API server over the plant matcher
// Usage: cargo run --features api --bin api_server

use plantpal::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "plantpal=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  DATA_DIR: {}", config.data_dir.display());
    tracing::info!(
        "  RECOMMENDATION_URL: {}",
        config.recommendation_url.as_deref().unwrap_or("(disabled)")
    );
    tracing::info!("  CACHE_TTL_SECS: {}", config.cache_ttl_secs);
    tracing::info!("  PORT: {}", config.port);

    let state = AppState::new(&config);
    tracing::info!("Catalog loaded with {} plants", state.catalog.len());

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Starting server on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .await?;

    Ok(())
}
