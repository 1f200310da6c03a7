use std::sync::Arc;

use gavel_core::{
    AuctionService, Config, PollerRegistry, RegistrationStore, SanitizedConfig,
};

/// Shared application state
pub struct AppState {
    config: Config,
    auction_service: Arc<dyn AuctionService>,
    poller_registry: Arc<PollerRegistry>,
    registrations: RegistrationStore,
}

impl AppState {
    pub fn new(
        config: Config,
        auction_service: Arc<dyn AuctionService>,
        poller_registry: Arc<PollerRegistry>,
        registrations: RegistrationStore,
    ) -> Self {
        Self {
            config,
            auction_service,
            poller_registry,
            registrations,
        }
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn auction_service(&self) -> &Arc<dyn AuctionService> {
        &self.auction_service
    }

    pub fn poller_registry(&self) -> &Arc<PollerRegistry> {
        &self.poller_registry
    }

    pub fn registrations(&self) -> &RegistrationStore {
        &self.registrations
    }
}
