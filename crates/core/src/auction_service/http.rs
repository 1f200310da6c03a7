//! HTTP auction service client.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::AuctionServiceConfig;
use crate::metrics;
use crate::ticket::{Ticket, TicketStatus};

use super::{
    Auction, AuctionService, AuctionServiceError, AuctionSummary, IssueTicketRequest, ProbeStatus,
    ReceiptDocument, ReceiptRequest,
};

/// Wire status value that denotes a settled payment. Every other value is
/// treated as not-yet-paid.
const PAID_STATUS: &str = "paid";

/// HTTP client for the remote auction service.
pub struct HttpAuctionService {
    client: Client,
    config: AuctionServiceConfig,
}

impl HttpAuctionService {
    /// Create a new client from configuration.
    pub fn new(config: AuctionServiceConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Get the base URL without trailing slash.
    fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    fn map_transport_error(e: reqwest::Error) -> AuctionServiceError {
        if e.is_timeout() {
            AuctionServiceError::Timeout
        } else if e.is_connect() {
            AuctionServiceError::ConnectionFailed(e.to_string())
        } else {
            AuctionServiceError::ApiError(e.to_string())
        }
    }

    /// Make an authenticated GET request and decode the JSON body.
    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        not_found: impl FnOnce() -> AuctionServiceError,
    ) -> Result<T, AuctionServiceError> {
        let url = format!("{}{}", self.base_url(), endpoint);
        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.config.api_key)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(not_found());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuctionServiceError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuctionServiceError::Decode(e.to_string()))
    }

    /// Make an authenticated POST request with a JSON body and decode the response.
    async fn post_json<B: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, AuctionServiceError> {
        let url = format!("{}{}", self.base_url(), endpoint);
        let response = self
            .client
            .post(&url)
            .header("X-Api-Key", &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuctionServiceError::ApiError(format!(
                "HTTP {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AuctionServiceError::Decode(e.to_string()))
    }
}

#[async_trait]
impl AuctionService for HttpAuctionService {
    fn name(&self) -> &str {
        "http"
    }

    async fn list_auctions(&self) -> Result<Vec<AuctionSummary>, AuctionServiceError> {
        let _timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&["list_auctions"])
            .start_timer();
        let auctions: Vec<WireAuctionSummary> = self
            .get_json("/api/v1/auctions", || {
                AuctionServiceError::ApiError("auction listing unavailable".to_string())
            })
            .await?;

        Ok(auctions.into_iter().map(Into::into).collect())
    }

    async fn get_auction(&self, id: &str) -> Result<Auction, AuctionServiceError> {
        let _timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&["get_auction"])
            .start_timer();
        let auction: WireAuction = self
            .get_json(&format!("/api/v1/auctions/{}", id), || {
                AuctionServiceError::AuctionNotFound(id.to_string())
            })
            .await?;

        Ok(auction.into())
    }

    async fn issue_ticket(
        &self,
        request: IssueTicketRequest,
    ) -> Result<Ticket, AuctionServiceError> {
        debug!(auction_id = %request.auction_id, "Issuing payment ticket");
        let _timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&["issue_ticket"])
            .start_timer();

        let wire: WireTicket = self.post_json("/api/v1/tickets", &request).await?;

        Ok(Ticket {
            id: wire.ticket_id,
            auction_id: request.auction_id,
            amount_cents: wire.amount_cents,
            payee_account: request.payee_account,
            payee_bank: request.payee_bank,
            payee_branch: request.payee_branch,
            qr_ref: wire.qr_url,
            description: wire.description,
            issued_at: wire.issued_at.unwrap_or_else(Utc::now),
            status: TicketStatus::Pending,
        })
    }

    async fn probe_ticket(&self, ticket_id: &str) -> Result<ProbeStatus, AuctionServiceError> {
        let _timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&["probe_ticket"])
            .start_timer();
        let wire: WireTicketStatus = self
            .get_json(&format!("/api/v1/tickets/{}/status", ticket_id), || {
                AuctionServiceError::TicketNotFound(ticket_id.to_string())
            })
            .await?;

        if wire.status == PAID_STATUS {
            Ok(ProbeStatus::Paid)
        } else {
            Ok(ProbeStatus::NotPaid)
        }
    }

    async fn export_receipt(
        &self,
        request: ReceiptRequest,
    ) -> Result<ReceiptDocument, AuctionServiceError> {
        debug!(ticket_id = %request.ticket_id, "Requesting receipt export");
        let _timer = metrics::EXTERNAL_SERVICE_DURATION
            .with_label_values(&["export_receipt"])
            .start_timer();

        let wire: WireReceipt = self.post_json("/api/v1/receipts", &request).await?;

        Ok(ReceiptDocument {
            url: wire.url,
            content_type: wire.content_type,
        })
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Deserialize)]
struct WireAuctionSummary {
    id: String,
    title: String,
    registration_fee_cents: u64,
    starts_at: DateTime<Utc>,
}

impl From<WireAuctionSummary> for AuctionSummary {
    fn from(w: WireAuctionSummary) -> Self {
        Self {
            id: w.id,
            title: w.title,
            registration_fee_cents: w.registration_fee_cents,
            starts_at: w.starts_at,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireAuction {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    registration_fee_cents: u64,
    starts_at: DateTime<Utc>,
    #[serde(default)]
    open_for_registration: bool,
}

impl From<WireAuction> for Auction {
    fn from(w: WireAuction) -> Self {
        Self {
            id: w.id,
            title: w.title,
            description: w.description,
            registration_fee_cents: w.registration_fee_cents,
            starts_at: w.starts_at,
            open_for_registration: w.open_for_registration,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireTicket {
    ticket_id: String,
    qr_url: String,
    amount_cents: u64,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    issued_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct WireTicketStatus {
    status: String,
}

#[derive(Debug, Deserialize)]
struct WireReceipt {
    url: String,
    content_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let service = HttpAuctionService::new(AuctionServiceConfig {
            url: "http://localhost:9200/".to_string(),
            api_key: "k".to_string(),
            timeout_secs: 30,
        });
        assert_eq!(service.base_url(), "http://localhost:9200");
    }

    #[test]
    fn test_wire_ticket_decoding() {
        let json = r#"{
            "ticket_id": "tkt-42",
            "qr_url": "https://svc.example/qr/tkt-42.png",
            "amount_cents": 50000,
            "description": "Registration fee"
        }"#;
        let wire: WireTicket = serde_json::from_str(json).unwrap();
        assert_eq!(wire.ticket_id, "tkt-42");
        assert_eq!(wire.amount_cents, 50_000);
        assert!(wire.issued_at.is_none());
    }

    #[test]
    fn test_wire_status_only_paid_value_is_paid() {
        for (raw, expected) in [
            ("paid", ProbeStatus::Paid),
            ("pending", ProbeStatus::NotPaid),
            ("created", ProbeStatus::NotPaid),
            ("expired", ProbeStatus::NotPaid),
        ] {
            let wire = WireTicketStatus {
                status: raw.to_string(),
            };
            let mapped = if wire.status == PAID_STATUS {
                ProbeStatus::Paid
            } else {
                ProbeStatus::NotPaid
            };
            assert_eq!(mapped, expected, "status {:?}", raw);
        }
    }
}
