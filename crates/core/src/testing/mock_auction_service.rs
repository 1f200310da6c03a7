//! Mock auction service for testing.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auction_service::{
    Auction, AuctionService, AuctionServiceError, AuctionSummary, IssueTicketRequest, ProbeStatus,
    ReceiptDocument, ReceiptRequest,
};
use crate::ticket::{Ticket, TicketStatus};

/// Scripted outcome for a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptedProbe {
    /// Report the payment as settled.
    Paid,
    /// Report no payment yet.
    NotPaid,
    /// Fail the probe with a transport-style error.
    Error,
}

/// Mock implementation of the AuctionService trait.
///
/// Provides controllable behavior for testing:
/// - Script per-probe outcomes, or settle a payment after N probes
/// - Count probes per ticket for budget assertions
/// - Record issued tickets and exported receipts
/// - Simulate failures
#[derive(Default)]
pub struct MockAuctionService {
    /// Known auctions by id.
    auctions: Arc<RwLock<HashMap<String, Auction>>>,
    /// Probe counts per ticket id.
    probe_counts: Arc<RwLock<HashMap<String, u32>>>,
    /// Probe number (1-indexed) from which a ticket reports Paid.
    paid_after: Arc<RwLock<HashMap<String, u32>>>,
    /// Scripted probe outcomes per ticket, consumed front to back.
    probe_scripts: Arc<RwLock<HashMap<String, Vec<ScriptedProbe>>>>,
    /// Recorded issue_ticket requests.
    issued: Arc<RwLock<Vec<IssueTicketRequest>>>,
    /// Recorded export_receipt requests.
    receipts: Arc<RwLock<Vec<ReceiptRequest>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<AuctionServiceError>>>,
    /// Counter for generating unique ticket ids.
    ticket_counter: Arc<RwLock<u32>>,
}

impl MockAuctionService {
    /// Create a new mock auction service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an auction for list/get operations.
    pub async fn add_auction(&self, auction: Auction) {
        self.auctions
            .write()
            .await
            .insert(auction.id.clone(), auction);
    }

    /// Report the ticket as paid from probe number `n` (1-indexed) onwards.
    pub async fn set_paid_after(&self, ticket_id: &str, n: u32) {
        self.paid_after
            .write()
            .await
            .insert(ticket_id.to_string(), n);
    }

    /// Script exact outcomes for the next probes of a ticket. Once the
    /// script is consumed, the `set_paid_after` rule (or NotPaid) applies.
    pub async fn set_probe_script(&self, ticket_id: &str, script: Vec<ScriptedProbe>) {
        self.probe_scripts
            .write()
            .await
            .insert(ticket_id.to_string(), script);
    }

    /// Number of probes made for a ticket.
    pub async fn probe_count(&self, ticket_id: &str) -> u32 {
        self.probe_counts
            .read()
            .await
            .get(ticket_id)
            .copied()
            .unwrap_or(0)
    }

    /// Get all recorded issue_ticket requests.
    pub async fn issued_tickets(&self) -> Vec<IssueTicketRequest> {
        self.issued.read().await.clone()
    }

    /// Get all recorded export_receipt requests.
    pub async fn exported_receipts(&self) -> Vec<ReceiptRequest> {
        self.receipts.read().await.clone()
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: AuctionServiceError) {
        *self.next_error.write().await = Some(error);
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<AuctionServiceError> {
        self.next_error.write().await.take()
    }

    /// Generate a unique mock ticket id.
    async fn generate_ticket_id(&self) -> String {
        let mut counter = self.ticket_counter.write().await;
        *counter += 1;
        format!("mock-ticket-{:04}", *counter)
    }
}

#[async_trait]
impl AuctionService for MockAuctionService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_auctions(&self) -> Result<Vec<AuctionSummary>, AuctionServiceError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        let auctions = self.auctions.read().await;
        let mut result: Vec<AuctionSummary> = auctions
            .values()
            .map(|a| AuctionSummary {
                id: a.id.clone(),
                title: a.title.clone(),
                registration_fee_cents: a.registration_fee_cents,
                starts_at: a.starts_at,
            })
            .collect();
        result.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(result)
    }

    async fn get_auction(&self, id: &str) -> Result<Auction, AuctionServiceError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.auctions
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AuctionServiceError::AuctionNotFound(id.to_string()))
    }

    async fn issue_ticket(
        &self,
        request: IssueTicketRequest,
    ) -> Result<Ticket, AuctionServiceError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        // Record the request
        self.issued.write().await.push(request.clone());

        let id = self.generate_ticket_id().await;
        let amount_cents = self
            .auctions
            .read()
            .await
            .get(&request.auction_id)
            .map(|a| a.registration_fee_cents)
            .unwrap_or(50_000);

        Ok(Ticket {
            id: id.clone(),
            auction_id: request.auction_id,
            amount_cents,
            payee_account: request.payee_account,
            payee_bank: request.payee_bank,
            payee_branch: request.payee_branch,
            qr_ref: format!("https://mock.example/qr/{}.png", id),
            description: Some("Registration fee".to_string()),
            issued_at: Utc::now(),
            status: TicketStatus::Pending,
        })
    }

    async fn probe_ticket(&self, ticket_id: &str) -> Result<ProbeStatus, AuctionServiceError> {
        let probe_number = {
            let mut counts = self.probe_counts.write().await;
            let count = counts.entry(ticket_id.to_string()).or_insert(0);
            *count += 1;
            *count
        };

        // Scripted outcomes take precedence
        {
            let mut scripts = self.probe_scripts.write().await;
            if let Some(script) = scripts.get_mut(ticket_id) {
                if !script.is_empty() {
                    return match script.remove(0) {
                        ScriptedProbe::Paid => Ok(ProbeStatus::Paid),
                        ScriptedProbe::NotPaid => Ok(ProbeStatus::NotPaid),
                        ScriptedProbe::Error => Err(AuctionServiceError::ConnectionFailed(
                            "scripted probe error".to_string(),
                        )),
                    };
                }
            }
        }

        let paid_after = self.paid_after.read().await.get(ticket_id).copied();
        match paid_after {
            Some(n) if probe_number >= n => Ok(ProbeStatus::Paid),
            _ => Ok(ProbeStatus::NotPaid),
        }
    }

    async fn export_receipt(
        &self,
        request: ReceiptRequest,
    ) -> Result<ReceiptDocument, AuctionServiceError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        self.receipts.write().await.push(request.clone());

        Ok(ReceiptDocument {
            url: format!("https://mock.example/receipts/{}.pdf", request.ticket_id),
            content_type: "application/pdf".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_probe_defaults_to_not_paid() {
        let service = MockAuctionService::new();
        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::NotPaid
        );
        assert_eq!(service.probe_count("tkt-1").await, 1);
    }

    #[tokio::test]
    async fn test_paid_after_threshold() {
        let service = MockAuctionService::new();
        service.set_paid_after("tkt-1", 3).await;

        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::NotPaid
        );
        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::NotPaid
        );
        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::Paid
        );
        assert_eq!(service.probe_count("tkt-1").await, 3);
    }

    #[tokio::test]
    async fn test_scripted_probes() {
        let service = MockAuctionService::new();
        service
            .set_probe_script(
                "tkt-1",
                vec![
                    ScriptedProbe::NotPaid,
                    ScriptedProbe::Error,
                    ScriptedProbe::Paid,
                ],
            )
            .await;

        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::NotPaid
        );
        assert!(service.probe_ticket("tkt-1").await.is_err());
        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::Paid
        );
        // Script exhausted, falls back to NotPaid
        assert_eq!(
            service.probe_ticket("tkt-1").await.unwrap(),
            ProbeStatus::NotPaid
        );
    }

    #[tokio::test]
    async fn test_issue_ticket_records_request() {
        let service = MockAuctionService::new();

        let ticket = service
            .issue_ticket(IssueTicketRequest {
                auction_id: "auction-1".to_string(),
                payee_account: "12345678".to_string(),
                payee_bank: "First National".to_string(),
                payee_branch: "Main St".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(ticket.status, TicketStatus::Pending);
        assert!(ticket.qr_ref.contains(&ticket.id));

        let issued = service.issued_tickets().await;
        assert_eq!(issued.len(), 1);
        assert_eq!(issued[0].auction_id, "auction-1");
    }

    #[tokio::test]
    async fn test_error_injection() {
        let service = MockAuctionService::new();

        service
            .set_next_error(AuctionServiceError::ConnectionFailed("test".into()))
            .await;

        let result = service
            .issue_ticket(IssueTicketRequest {
                auction_id: "auction-1".to_string(),
                payee_account: "1".to_string(),
                payee_bank: "b".to_string(),
                payee_branch: "br".to_string(),
            })
            .await;
        assert!(result.is_err());

        // Error should be consumed
        let result = service
            .issue_ticket(IssueTicketRequest {
                auction_id: "auction-1".to_string(),
                payee_account: "1".to_string(),
                payee_bank: "b".to_string(),
                payee_branch: "br".to_string(),
            })
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_list_and_get_auctions() {
        let service = MockAuctionService::new();
        service
            .add_auction(crate::testing::fixtures::auction("auction-1", "Estate"))
            .await;
        service
            .add_auction(crate::testing::fixtures::auction("auction-2", "Art"))
            .await;

        let listed = service.list_auctions().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, "auction-1");

        let auction = service.get_auction("auction-2").await.unwrap();
        assert_eq!(auction.title, "Art");

        let missing = service.get_auction("auction-9").await;
        assert!(matches!(
            missing,
            Err(AuctionServiceError::AuctionNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_export_receipt_records_request() {
        let service = MockAuctionService::new();

        let doc = service
            .export_receipt(ReceiptRequest {
                ticket_id: "tkt-1".to_string(),
                registrant_name: "Ada".to_string(),
                registrant_email: "ada@example.com".to_string(),
                auction_id: "auction-1".to_string(),
            })
            .await
            .unwrap();

        assert!(doc.url.contains("tkt-1"));
        assert_eq!(doc.content_type, "application/pdf");
        assert_eq!(service.exported_receipts().await.len(), 1);
    }
}
