mod api;
mod metrics;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gavel_core::{
    load_config, validate_config, AuctionService, HttpAuctionService, PollerRegistry,
    RegistrationStore,
};

use api::create_router;
use state::AppState;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("GAVEL_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    // Validate configuration
    validate_config(&config).context("Configuration validation failed")?;

    info!("Configuration loaded successfully");
    info!("Auction service: {}", config.auction_service.url);
    info!(
        "Poller: {}ms cadence, {} attempt budget",
        config.poller.interval_ms, config.poller.max_attempts
    );

    // Create auction service client
    let auction_service: Arc<dyn AuctionService> =
        Arc::new(HttpAuctionService::new(config.auction_service.clone()));
    info!("Using auction service backend: {}", auction_service.name());

    // Create confirmation poller registry
    let poller_registry = Arc::new(PollerRegistry::new(
        config.poller.clone(),
        Arc::clone(&auction_service),
    ));
    info!("Confirmation poller registry initialized");

    // Create in-memory registration store
    let registrations = RegistrationStore::new();
    info!("Registration store initialized");

    // Create app state
    let state = Arc::new(AppState::new(
        config.clone(),
        auction_service,
        Arc::clone(&poller_registry),
        registrations,
    ));

    // Create router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    // Stop any active confirmation pollers before exiting
    info!("Server shutting down...");
    poller_registry.stop_all().await;
    info!("Confirmation pollers stopped");

    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
