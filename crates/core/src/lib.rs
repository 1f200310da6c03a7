pub mod auction_service;
pub mod config;
pub mod metrics;
pub mod poller;
pub mod registration;
pub mod testing;
pub mod ticket;

pub use auction_service::{
    Auction, AuctionService, AuctionServiceError, AuctionSummary, HttpAuctionService,
    IssueTicketRequest, ProbeStatus, ReceiptDocument, ReceiptRequest,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuctionServiceConfig, Config, ConfigError,
    SanitizedConfig, ServerConfig,
};
pub use poller::{
    ConfirmationPoller, OutcomeCallback, OutcomeHooks, PollPhase, PollerConfig, PollerError,
    PollerRegistry, PollerStatus, ProbeOutcome,
};
pub use registration::{
    CreateRegistrationRequest, Registration, RegistrationError, RegistrationStore,
};
pub use ticket::{Ticket, TicketStatus};
