//! Types for the confirmation poller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::ticket::TicketStatus;

/// Errors that can occur when managing pollers.
#[derive(Debug, Error)]
pub enum PollerError {
    /// A poller is already registered for this registration.
    #[error("poller already active for registration: {0}")]
    AlreadyActive(String),

    /// No poller registered for this registration.
    #[error("no poller for registration: {0}")]
    NotFound(String),
}

/// Phase of the confirmation poller.
///
/// ```text
/// Idle -> Polling -> Confirmed
///              \--> Exhausted
/// ```
///
/// `Confirmed` and `Exhausted` are terminal and mutually exclusive. Teardown
/// stops a `Polling` poller without entering either.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PollPhase {
    /// Created but not yet started.
    Idle,
    /// Timer running, probing on each tick.
    Polling,
    /// Payment observed; receipt export unlocked.
    Confirmed,
    /// Attempt budget consumed without a payment.
    Exhausted,
}

impl PollPhase {
    /// Returns true if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollPhase::Confirmed | PollPhase::Exhausted)
    }

    /// Returns the phase as a string (for API responses).
    pub fn as_str(&self) -> &'static str {
        match self {
            PollPhase::Idle => "idle",
            PollPhase::Polling => "polling",
            PollPhase::Confirmed => "confirmed",
            PollPhase::Exhausted => "exhausted",
        }
    }
}

/// Normalized result of one probe, as seen by the state machine.
///
/// The probe call itself distinguishes transport errors from a not-paid
/// answer; the distinction is kept here so errors can be logged and counted,
/// even though both currently consume one attempt and leave the poller in
/// `Polling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The service confirmed the payment.
    Paid,
    /// The service answered, payment not observed yet.
    NotPaid,
    /// Transport or server error; not an authoritative answer.
    Error,
}

/// Snapshot of a poller, published on every tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerStatus {
    /// Current phase.
    pub phase: PollPhase,
    /// Probes made so far.
    pub attempts_made: u32,
    /// Seconds left in the confirmation window (presentational).
    pub remaining_seconds: u64,
    /// Observed ticket status.
    pub ticket_status: TicketStatus,
}

/// Callback fired exactly once on a terminal transition.
pub type OutcomeCallback = Arc<dyn Fn() + Send + Sync>;

/// Terminal outcome callbacks supplied by the owning view.
///
/// `on_paid` is expected to unlock receipt export; `on_failed` to surface a
/// user-facing failure notice. The poller treats both as fire-and-forget and
/// never invokes either more than once.
#[derive(Clone)]
pub struct OutcomeHooks {
    pub on_paid: OutcomeCallback,
    pub on_failed: OutcomeCallback,
}

impl OutcomeHooks {
    /// Create hooks from a pair of callbacks.
    pub fn new(on_paid: OutcomeCallback, on_failed: OutcomeCallback) -> Self {
        Self { on_paid, on_failed }
    }

    /// Hooks that do nothing. Useful in tests.
    pub fn noop() -> Self {
        Self {
            on_paid: Arc::new(|| {}),
            on_failed: Arc::new(|| {}),
        }
    }
}

impl std::fmt::Debug for OutcomeHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutcomeHooks").finish_non_exhaustive()
    }
}
