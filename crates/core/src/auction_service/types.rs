//! Types for auction service operations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::Ticket;

/// Errors that can occur during auction service operations.
#[derive(Debug, Error)]
pub enum AuctionServiceError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Auction not found: {0}")]
    AuctionNotFound(String),

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request timeout")]
    Timeout,
}

/// Result of a single ticket status probe.
///
/// The wire protocol reserves one status value for a settled payment; the
/// client maps that value to `Paid` and every other value to `NotPaid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// The service has matched an incoming payment to the ticket.
    Paid,
    /// No payment observed for the ticket yet.
    NotPaid,
}

/// Summary of an auction for browse listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionSummary {
    /// Auction identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Registration fee in minor currency units.
    pub registration_fee_cents: u64,
    /// When the auction opens for bidding.
    pub starts_at: DateTime<Utc>,
}

/// Full auction detail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Auction {
    /// Auction identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Longer description of the lot on offer.
    pub description: String,
    /// Registration fee in minor currency units.
    pub registration_fee_cents: u64,
    /// When the auction opens for bidding.
    pub starts_at: DateTime<Utc>,
    /// Whether registrations are currently accepted.
    pub open_for_registration: bool,
}

/// Request to issue a payment ticket for a registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueTicketRequest {
    /// The auction the registration targets.
    pub auction_id: String,
    /// Registrant's bank account number.
    pub payee_account: String,
    /// Registrant's bank name.
    pub payee_bank: String,
    /// Registrant's bank branch.
    pub payee_branch: String,
}

/// Request to export a payment receipt after confirmation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptRequest {
    /// Ticket the receipt is for.
    pub ticket_id: String,
    /// Registrant name as collected in the wizard.
    pub registrant_name: String,
    /// Registrant email as collected in the wizard.
    pub registrant_email: String,
    /// The auction the registration targets.
    pub auction_id: String,
}

/// A generated receipt document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptDocument {
    /// Download URL for the generated document.
    pub url: String,
    /// Document content type (e.g., "application/pdf").
    pub content_type: String,
}

/// Trait for auction service backends.
#[async_trait]
pub trait AuctionService: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// List auctions available for browsing.
    async fn list_auctions(&self) -> Result<Vec<AuctionSummary>, AuctionServiceError>;

    /// Get a single auction by id.
    async fn get_auction(&self, id: &str) -> Result<Auction, AuctionServiceError>;

    /// Issue a payment ticket for a registration.
    ///
    /// Returns the ticket id, QR image reference, amount, and payee echo.
    async fn issue_ticket(
        &self,
        request: IssueTicketRequest,
    ) -> Result<Ticket, AuctionServiceError>;

    /// Probe the payment status of a ticket.
    ///
    /// A single remote read with no server-side effects. Transport errors
    /// are not authoritative; callers decide how to fold them.
    async fn probe_ticket(&self, ticket_id: &str) -> Result<ProbeStatus, AuctionServiceError>;

    /// Export a receipt document for a confirmed payment.
    async fn export_receipt(
        &self,
        request: ReceiptRequest,
    ) -> Result<ReceiptDocument, AuctionServiceError>;
}
