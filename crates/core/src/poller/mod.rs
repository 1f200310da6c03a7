//! Payment confirmation poller.
//!
//! After the auction service issues a payment ticket there is no push channel
//! for this flow: the poller is the only way the portal learns whether money
//! arrived. It probes the ticket status on a fixed cadence against a fixed
//! attempt budget and drives exactly one terminal transition:
//! `Polling -> Confirmed` or `Polling -> Exhausted`.

mod config;
mod registry;
mod runner;
mod types;

pub use config::PollerConfig;
pub use registry::PollerRegistry;
pub use runner::ConfirmationPoller;
pub use types::{
    OutcomeCallback, OutcomeHooks, PollPhase, PollerError, PollerStatus, ProbeOutcome,
};
