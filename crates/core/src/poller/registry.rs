//! Registry of active confirmation pollers.
//!
//! Enforces the single-poller invariant: at most one poller per registration
//! per ticket. The registration view begins a poll when the payment step is
//! entered and tears it down when the view goes away.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::auction_service::AuctionService;
use crate::ticket::Ticket;

use super::config::PollerConfig;
use super::runner::ConfirmationPoller;
use super::types::{OutcomeHooks, PollerError};

/// Tracks one live poller per registration.
pub struct PollerRegistry {
    config: PollerConfig,
    service: Arc<dyn AuctionService>,
    pollers: RwLock<HashMap<String, Arc<ConfirmationPoller>>>,
}

impl PollerRegistry {
    /// Create an empty registry.
    pub fn new(config: PollerConfig, service: Arc<dyn AuctionService>) -> Self {
        Self {
            config,
            service,
            pollers: RwLock::new(HashMap::new()),
        }
    }

    /// Start confirmation polling for a registration's ticket.
    ///
    /// Rejects a second poller for the same registration; the existing one
    /// must be torn down first.
    pub async fn begin(
        &self,
        registration_id: &str,
        ticket: Ticket,
        hooks: OutcomeHooks,
    ) -> Result<Arc<ConfirmationPoller>, PollerError> {
        let mut pollers = self.pollers.write().await;
        if pollers.contains_key(registration_id) {
            return Err(PollerError::AlreadyActive(registration_id.to_string()));
        }

        let poller = Arc::new(ConfirmationPoller::new(
            self.config.clone(),
            Arc::clone(&self.service),
            ticket,
            hooks,
        ));
        poller.start().await;
        pollers.insert(registration_id.to_string(), Arc::clone(&poller));

        debug!(registration_id, "Confirmation poll started");
        Ok(poller)
    }

    /// Get the poller for a registration, if any.
    pub async fn get(&self, registration_id: &str) -> Option<Arc<ConfirmationPoller>> {
        self.pollers.read().await.get(registration_id).cloned()
    }

    /// Stop and remove the poller for a registration (view teardown).
    pub async fn teardown(&self, registration_id: &str) -> Result<(), PollerError> {
        let poller = {
            let mut pollers = self.pollers.write().await;
            pollers
                .remove(registration_id)
                .ok_or_else(|| PollerError::NotFound(registration_id.to_string()))?
        };

        poller.stop().await;
        debug!(registration_id, "Confirmation poll torn down");
        Ok(())
    }

    /// Number of tracked pollers.
    pub async fn len(&self) -> usize {
        self.pollers.read().await.len()
    }

    /// Whether the registry tracks no pollers.
    pub async fn is_empty(&self) -> bool {
        self.pollers.read().await.is_empty()
    }

    /// Stop every tracked poller (server shutdown).
    pub async fn stop_all(&self) {
        let pollers: Vec<_> = {
            let mut map = self.pollers.write().await;
            map.drain().collect()
        };

        if !pollers.is_empty() {
            info!("Stopping {} active confirmation pollers", pollers.len());
        }
        futures::future::join_all(pollers.iter().map(|(_, poller)| poller.stop())).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixtures, MockAuctionService};

    fn registry() -> PollerRegistry {
        let service = Arc::new(MockAuctionService::new());
        PollerRegistry::new(
            PollerConfig {
                interval_ms: 5_000,
                max_attempts: 15,
            },
            service,
        )
    }

    #[tokio::test]
    async fn test_begin_and_get() {
        let registry = registry();
        let poller = registry
            .begin("reg-1", fixtures::pending_ticket("tkt-1"), OutcomeHooks::noop())
            .await
            .unwrap();

        assert_eq!(poller.ticket().id, "tkt-1");
        assert!(registry.get("reg-1").await.is_some());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_second_poller_for_same_registration_rejected() {
        let registry = registry();
        registry
            .begin("reg-1", fixtures::pending_ticket("tkt-1"), OutcomeHooks::noop())
            .await
            .unwrap();

        let result = registry
            .begin("reg-1", fixtures::pending_ticket("tkt-1"), OutcomeHooks::noop())
            .await;
        assert!(matches!(result, Err(PollerError::AlreadyActive(_))));
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn test_teardown_removes_poller() {
        let registry = registry();
        registry
            .begin("reg-1", fixtures::pending_ticket("tkt-1"), OutcomeHooks::noop())
            .await
            .unwrap();

        registry.teardown("reg-1").await.unwrap();
        assert!(registry.get("reg-1").await.is_none());
        assert!(registry.is_empty().await);

        // A new poll may begin after teardown
        registry
            .begin("reg-1", fixtures::pending_ticket("tkt-2"), OutcomeHooks::noop())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_teardown_unknown_registration_fails() {
        let registry = registry();
        let result = registry.teardown("missing").await;
        assert!(matches!(result, Err(PollerError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_stop_all_drains_registry() {
        let registry = registry();
        registry
            .begin("reg-1", fixtures::pending_ticket("tkt-1"), OutcomeHooks::noop())
            .await
            .unwrap();
        registry
            .begin("reg-2", fixtures::pending_ticket("tkt-2"), OutcomeHooks::noop())
            .await
            .unwrap();

        registry.stop_all().await;
        assert!(registry.is_empty().await);
    }
}
