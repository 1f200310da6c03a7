use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::{auctions, handlers, registrations};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // API routes
    let api_routes = Router::new()
        // Health, config, metrics
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config))
        .route("/metrics", get(handlers::get_metrics))
        // Auction browsing
        .route("/auctions", get(auctions::list_auctions))
        .route("/auctions/{id}", get(auctions::get_auction))
        // Registrations and payment confirmation
        .route("/registrations", post(registrations::create_registration))
        .route("/registrations/{id}", get(registrations::get_registration))
        .route(
            "/registrations/{id}",
            delete(registrations::delete_registration),
        )
        .route(
            "/registrations/{id}/receipt",
            post(registrations::export_receipt),
        )
        .with_state(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(super::middleware::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
