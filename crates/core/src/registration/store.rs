//! In-memory registration store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::types::{CreateRegistrationRequest, Registration, RegistrationError};

/// In-memory store of live registration flows.
///
/// The outcome hooks hold a clone of the store and write the terminal flags
/// exactly once; everything else only reads.
#[derive(Clone, Default)]
pub struct RegistrationStore {
    registrations: Arc<RwLock<HashMap<String, Registration>>>,
}

impl RegistrationStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new registration with a generated id.
    pub async fn create(&self, request: CreateRegistrationRequest) -> Registration {
        let registration = Registration {
            id: Uuid::new_v4().to_string(),
            registrant_name: request.registrant_name,
            registrant_email: request.registrant_email,
            auction_id: request.auction_id,
            ticket: request.ticket,
            created_at: Utc::now(),
            receipt_available: false,
            failure_notice: None,
        };

        self.registrations
            .write()
            .await
            .insert(registration.id.clone(), registration.clone());

        registration
    }

    /// Get a registration by id.
    pub async fn get(&self, id: &str) -> Option<Registration> {
        self.registrations.read().await.get(id).cloned()
    }

    /// Remove a registration (the user left the flow).
    pub async fn remove(&self, id: &str) -> Result<Registration, RegistrationError> {
        self.registrations
            .write()
            .await
            .remove(id)
            .ok_or_else(|| RegistrationError::NotFound(id.to_string()))
    }

    /// Record a confirmed payment: unlocks receipt export.
    pub async fn mark_paid(&self, id: &str) {
        if let Some(registration) = self.registrations.write().await.get_mut(id) {
            registration.ticket.status = crate::ticket::TicketStatus::Paid;
            registration.receipt_available = true;
        }
    }

    /// Record an exhausted confirmation window with a user-facing notice.
    pub async fn mark_failed(&self, id: &str, notice: impl Into<String>) {
        if let Some(registration) = self.registrations.write().await.get_mut(id) {
            registration.ticket.status = crate::ticket::TicketStatus::Failed;
            registration.failure_notice = Some(notice.into());
        }
    }

    /// Number of live registrations.
    pub async fn len(&self) -> usize {
        self.registrations.read().await.len()
    }

    /// Whether the store is empty.
    pub async fn is_empty(&self) -> bool {
        self.registrations.read().await.is_empty()
    }
}
