//! Core ticket data types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Observed payment status of a ticket.
///
/// State machine flow:
/// ```text
/// Pending -> Paid
/// Pending -> Failed
/// ```
///
/// `Paid` and `Failed` are terminal and mutually exclusive; a ticket is
/// never reassigned once it reaches either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    /// Ticket issued, payment not yet observed.
    Pending,
    /// Payment confirmed by the auction service.
    Paid,
    /// Attempt budget exhausted without a confirmed payment.
    Failed,
}

impl TicketStatus {
    /// Returns true if this is a terminal status (no further transitions possible).
    pub fn is_terminal(&self) -> bool {
        matches!(self, TicketStatus::Paid | TicketStatus::Failed)
    }

    /// Returns the status as a string (for filtering and API responses).
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Pending => "pending",
            TicketStatus::Paid => "paid",
            TicketStatus::Failed => "failed",
        }
    }
}

/// A payment ticket for one registration attempt.
///
/// Everything except `status` is assigned by the auction service at issue
/// time and never changes. The ticket is held in memory for the lifetime of
/// the registration flow and discarded when the user leaves it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    /// Opaque identifier assigned by the auction service.
    pub id: String,

    /// The auction this registration targets.
    pub auction_id: String,

    /// Registration fee in minor currency units.
    pub amount_cents: u64,

    /// Payee bank account number.
    pub payee_account: String,

    /// Payee bank name.
    pub payee_bank: String,

    /// Payee bank branch.
    pub payee_branch: String,

    /// URL of the QR image rendered by the auction service.
    pub qr_ref: String,

    /// Human-readable payment description from the service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// When the ticket was issued.
    pub issued_at: DateTime<Utc>,

    /// Observed payment status.
    pub status: TicketStatus,
}
