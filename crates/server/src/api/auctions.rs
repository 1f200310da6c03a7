//! Auction browse handlers.
//!
//! Thin glue over the remote auction service: the portal renders what the
//! service returns and adds nothing of its own.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use std::sync::Arc;

use gavel_core::{Auction, AuctionServiceError, AuctionSummary};

use crate::state::AppState;

/// Error response
#[derive(Debug, Serialize)]
pub struct AuctionErrorResponse {
    pub error: String,
}

fn service_error_response(e: AuctionServiceError) -> (StatusCode, Json<AuctionErrorResponse>) {
    let status = match &e {
        AuctionServiceError::AuctionNotFound(_) => StatusCode::NOT_FOUND,
        AuctionServiceError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        _ => StatusCode::BAD_GATEWAY,
    };
    (
        status,
        Json(AuctionErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// List auctions available for browsing
pub async fn list_auctions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AuctionSummary>>, impl IntoResponse> {
    match state.auction_service().list_auctions().await {
        Ok(auctions) => Ok(Json(auctions)),
        Err(e) => Err(service_error_response(e)),
    }
}

/// Get a single auction by id
pub async fn get_auction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Auction>, impl IntoResponse> {
    match state.auction_service().get_auction(&id).await {
        Ok(auction) => Ok(Json(auction)),
        Err(e) => Err(service_error_response(e)),
    }
}
