//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the auction service trait,
//! allowing the confirmation pipeline to be tested without real
//! infrastructure.
//!
//! # Example
//!
//! ```rust,ignore
//! use gavel_core::testing::MockAuctionService;
//!
//! let service = MockAuctionService::new();
//!
//! // Payment settles on the third probe
//! service.set_paid_after("tkt-1", 3).await;
//!
//! // Use in a ConfirmationPoller or AppState...
//! ```

mod mock_auction_service;

pub use mock_auction_service::{MockAuctionService, ScriptedProbe};

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::Utc;

    use crate::auction_service::{Auction, AuctionSummary};
    use crate::ticket::{Ticket, TicketStatus};

    /// Create a pending ticket with reasonable defaults.
    pub fn pending_ticket(id: &str) -> Ticket {
        Ticket {
            id: id.to_string(),
            auction_id: "auction-1".to_string(),
            amount_cents: 50_000,
            payee_account: "12345678".to_string(),
            payee_bank: "First National".to_string(),
            payee_branch: "Main St".to_string(),
            qr_ref: format!("https://svc.example/qr/{}.png", id),
            description: Some("Registration fee".to_string()),
            issued_at: Utc::now(),
            status: TicketStatus::Pending,
        }
    }

    /// Create a test auction open for registration.
    pub fn auction(id: &str, title: &str) -> Auction {
        Auction {
            id: id.to_string(),
            title: title.to_string(),
            description: format!("{} estate sale", title),
            registration_fee_cents: 50_000,
            starts_at: Utc::now(),
            open_for_registration: true,
        }
    }

    /// Summary view of [`auction`].
    pub fn auction_summary(id: &str, title: &str) -> AuctionSummary {
        AuctionSummary {
            id: id.to_string(),
            title: title.to_string(),
            registration_fee_cents: 50_000,
            starts_at: Utc::now(),
        }
    }
}
