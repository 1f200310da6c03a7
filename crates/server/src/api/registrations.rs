//! Registration API handlers.
//!
//! The registration wizard's server side: issue a payment ticket, start the
//! confirmation poll, expose its countdown, and gate receipt export on the
//! confirmed outcome. Tearing the registration down stops the poll.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use gavel_core::{
    metrics, CreateRegistrationRequest, IssueTicketRequest, OutcomeHooks, PollerStatus,
    ReceiptDocument, ReceiptRequest, Registration, Ticket,
};

use crate::state::AppState;

/// Notice shown when the confirmation window closes without a payment.
const FAILURE_NOTICE: &str = "Payment was not confirmed in time. Retry or contact support.";

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating a registration
#[derive(Debug, Deserialize)]
pub struct CreateRegistrationBody {
    /// Registrant name
    pub registrant_name: String,
    /// Registrant email
    pub registrant_email: String,
    /// The auction to register for
    pub auction_id: String,
    /// Registrant's bank account number
    pub payee_account: String,
    /// Registrant's bank name
    pub payee_bank: String,
    /// Registrant's bank branch
    pub payee_branch: String,
}

/// Response for registration operations
#[derive(Debug, Serialize)]
pub struct RegistrationResponse {
    pub id: String,
    pub registrant_name: String,
    pub registrant_email: String,
    pub auction_id: String,
    pub ticket: Ticket,
    pub created_at: String,
    pub receipt_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_notice: Option<String>,
    /// Live confirmation poll snapshot, absent once the poll is torn down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poll: Option<PollerStatus>,
}

impl RegistrationResponse {
    fn from_parts(registration: Registration, poll: Option<PollerStatus>) -> Self {
        Self {
            id: registration.id,
            registrant_name: registration.registrant_name,
            registrant_email: registration.registrant_email,
            auction_id: registration.auction_id,
            ticket: registration.ticket,
            created_at: registration.created_at.to_rfc3339(),
            receipt_available: registration.receipt_available,
            failure_notice: registration.failure_notice,
            poll,
        }
    }
}

/// Error response
#[derive(Debug, Serialize)]
pub struct RegistrationErrorResponse {
    pub error: String,
}

fn error_response(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<RegistrationErrorResponse>) {
    (
        status,
        Json(RegistrationErrorResponse {
            error: message.into(),
        }),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Create a registration: issue a payment ticket and start the confirmation poll
pub async fn create_registration(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateRegistrationBody>,
) -> Result<(StatusCode, Json<RegistrationResponse>), impl IntoResponse> {
    let ticket = match state
        .auction_service()
        .issue_ticket(IssueTicketRequest {
            auction_id: body.auction_id.clone(),
            payee_account: body.payee_account.clone(),
            payee_bank: body.payee_bank.clone(),
            payee_branch: body.payee_branch.clone(),
        })
        .await
    {
        Ok(ticket) => {
            metrics::TICKETS_ISSUED.with_label_values(&["success"]).inc();
            ticket
        }
        Err(e) => {
            metrics::TICKETS_ISSUED.with_label_values(&["error"]).inc();
            return Err(error_response(StatusCode::BAD_GATEWAY, e.to_string()));
        }
    };

    let registration = state
        .registrations()
        .create(CreateRegistrationRequest {
            registrant_name: body.registrant_name,
            registrant_email: body.registrant_email,
            auction_id: body.auction_id,
            ticket: ticket.clone(),
        })
        .await;
    metrics::REGISTRATIONS_CREATED.inc();

    // Outcome hooks write the terminal flags onto the registration record,
    // exactly once per ticket.
    let paid_store = state.registrations().clone();
    let paid_id = registration.id.clone();
    let failed_store = state.registrations().clone();
    let failed_id = registration.id.clone();
    let hooks = OutcomeHooks::new(
        Arc::new(move || {
            let store = paid_store.clone();
            let id = paid_id.clone();
            tokio::spawn(async move { store.mark_paid(&id).await });
        }),
        Arc::new(move || {
            let store = failed_store.clone();
            let id = failed_id.clone();
            tokio::spawn(async move { store.mark_failed(&id, FAILURE_NOTICE).await });
        }),
    );

    let poller = match state
        .poller_registry()
        .begin(&registration.id, ticket, hooks)
        .await
    {
        Ok(poller) => poller,
        Err(e) => {
            return Err(error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                e.to_string(),
            ));
        }
    };

    let poll = poller.status();
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse::from_parts(registration, Some(poll))),
    ))
}

/// Get a registration with its live confirmation poll snapshot
pub async fn get_registration(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<RegistrationResponse>, impl IntoResponse> {
    let Some(registration) = state.registrations().get(&id).await else {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Registration not found: {}", id),
        ));
    };

    let poll = state
        .poller_registry()
        .get(&id)
        .await
        .map(|poller| poller.status());

    Ok(Json(RegistrationResponse::from_parts(registration, poll)))
}

/// Tear down a registration: stop the poll and discard the record
pub async fn delete_registration(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, impl IntoResponse> {
    if state.registrations().remove(&id).await.is_err() {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Registration not found: {}", id),
        ));
    }

    // The poller may already be gone if the server is shutting down.
    let _ = state.poller_registry().teardown(&id).await;

    Ok(StatusCode::NO_CONTENT)
}

/// Export a receipt for a confirmed payment
pub async fn export_receipt(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ReceiptDocument>, impl IntoResponse> {
    let Some(registration) = state.registrations().get(&id).await else {
        return Err(error_response(
            StatusCode::NOT_FOUND,
            format!("Registration not found: {}", id),
        ));
    };

    if !registration.receipt_available {
        return Err(error_response(
            StatusCode::CONFLICT,
            "Payment has not been confirmed for this registration",
        ));
    }

    match state
        .auction_service()
        .export_receipt(ReceiptRequest {
            ticket_id: registration.ticket.id.clone(),
            registrant_name: registration.registrant_name.clone(),
            registrant_email: registration.registrant_email.clone(),
            auction_id: registration.auction_id.clone(),
        })
        .await
    {
        Ok(document) => {
            metrics::RECEIPTS_EXPORTED
                .with_label_values(&["success"])
                .inc();
            Ok(Json(document))
        }
        Err(e) => {
            metrics::RECEIPTS_EXPORTED
                .with_label_values(&["error"])
                .inc();
            Err(error_response(StatusCode::BAD_GATEWAY, e.to_string()))
        }
    }
}
