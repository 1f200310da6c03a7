//! Confirmation poller implementation.
//!
//! One poller per registration, spawned when the payment step is entered and
//! stopped on terminal transition or view teardown, whichever comes first.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use crate::auction_service::{AuctionService, ProbeStatus};
use crate::metrics;
use crate::ticket::{Ticket, TicketStatus};

use super::config::PollerConfig;
use super::types::{OutcomeHooks, PollPhase, PollerStatus, ProbeOutcome};

/// The payment confirmation poller.
///
/// Owns the ticket's observed status and the attempt counter exclusively; the
/// rest of the view reads snapshots through [`ConfirmationPoller::status`] or
/// a [`watch`] subscription and never mutates the poller.
pub struct ConfirmationPoller {
    config: PollerConfig,
    service: Arc<dyn AuctionService>,
    ticket: Ticket,
    hooks: OutcomeHooks,

    // Runtime state
    running: Arc<AtomicBool>,
    shutdown_tx: broadcast::Sender<()>,
    status_tx: watch::Sender<PollerStatus>,
}

impl ConfirmationPoller {
    /// Create a new poller for a freshly issued ticket. Does not start it.
    pub fn new(
        config: PollerConfig,
        service: Arc<dyn AuctionService>,
        ticket: Ticket,
        hooks: OutcomeHooks,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        let (status_tx, _) = watch::channel(PollerStatus {
            phase: PollPhase::Idle,
            attempts_made: 0,
            remaining_seconds: config.total_budget_secs(),
            ticket_status: ticket.status,
        });

        Self {
            config,
            service,
            ticket,
            hooks,
            running: Arc::new(AtomicBool::new(false)),
            shutdown_tx,
            status_tx,
        }
    }

    /// The immutable ticket this poller watches.
    pub fn ticket(&self) -> &Ticket {
        &self.ticket
    }

    /// Current snapshot of the poller.
    pub fn status(&self) -> PollerStatus {
        self.status_tx.borrow().clone()
    }

    /// Subscribe to snapshot updates (one per tick plus the terminal one).
    pub fn subscribe(&self) -> watch::Receiver<PollerStatus> {
        self.status_tx.subscribe()
    }

    /// Start the polling loop (spawns a background task).
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!(ticket_id = %self.ticket.id, "Confirmation poller already running");
            return;
        }

        self.spawn_poll_loop();
    }

    /// Stop the poller without a terminal transition (view teardown).
    ///
    /// The shutdown signal is delivered synchronously; the loop observes it
    /// at its next suspension point and makes no state mutation and no hook
    /// call afterwards. Stopping an already-terminal poller is a no-op.
    pub async fn stop(&self) {
        if !self.running.swap(false, Ordering::SeqCst) {
            return;
        }
        let _ = self.shutdown_tx.send(());
    }

    fn spawn_poll_loop(&self) {
        let config = self.config.clone();
        let service = Arc::clone(&self.service);
        let ticket_id = self.ticket.id.clone();
        let hooks = self.hooks.clone();
        let running = Arc::clone(&self.running);
        let status_tx = self.status_tx.clone();
        let mut shutdown_rx = self.shutdown_tx.subscribe();

        tokio::spawn(async move {
            debug!(ticket_id = %ticket_id, "Confirmation poller started");
            let mut attempts_made: u32 = 0;

            status_tx.send_replace(PollerStatus {
                phase: PollPhase::Polling,
                attempts_made,
                remaining_seconds: config.total_budget_secs(),
                ticket_status: TicketStatus::Pending,
            });

            loop {
                tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!(ticket_id = %ticket_id, "Confirmation poller cancelled");
                        break;
                    }
                    _ = tokio::time::sleep(Duration::from_millis(config.interval_ms)) => {}
                }
                if !running.load(Ordering::Relaxed) {
                    break;
                }

                // The attempt is consumed up front, whatever the probe says.
                attempts_made += 1;
                metrics::PROBES_TOTAL.inc();

                let probe = tokio::select! {
                    _ = shutdown_rx.recv() => {
                        debug!(ticket_id = %ticket_id, "Confirmation poller cancelled mid-probe");
                        break;
                    }
                    result = service.probe_ticket(&ticket_id) => result,
                };

                let outcome = match probe {
                    Ok(ProbeStatus::Paid) => ProbeOutcome::Paid,
                    Ok(ProbeStatus::NotPaid) => ProbeOutcome::NotPaid,
                    Err(e) => {
                        // Not an authoritative answer; the attempt budget
                        // absorbs it. Kept distinct from NotPaid for logs
                        // and metrics.
                        warn!(
                            ticket_id = %ticket_id,
                            attempt = attempts_made,
                            "Status probe failed: {}",
                            e
                        );
                        metrics::PROBE_ERRORS_TOTAL.inc();
                        ProbeOutcome::Error
                    }
                };

                match outcome {
                    ProbeOutcome::Paid => {
                        info!(
                            ticket_id = %ticket_id,
                            attempt = attempts_made,
                            "Payment confirmed"
                        );
                        metrics::CONFIRMATIONS_TOTAL.inc();
                        status_tx.send_replace(PollerStatus {
                            phase: PollPhase::Confirmed,
                            attempts_made,
                            remaining_seconds: config.remaining_seconds(attempts_made),
                            ticket_status: TicketStatus::Paid,
                        });
                        (hooks.on_paid)();
                        break;
                    }
                    ProbeOutcome::NotPaid | ProbeOutcome::Error => {
                        if attempts_made >= config.max_attempts {
                            info!(
                                ticket_id = %ticket_id,
                                attempts = attempts_made,
                                "Confirmation window exhausted"
                            );
                            metrics::EXHAUSTIONS_TOTAL.inc();
                            status_tx.send_replace(PollerStatus {
                                phase: PollPhase::Exhausted,
                                attempts_made,
                                remaining_seconds: config.remaining_seconds(attempts_made),
                                ticket_status: TicketStatus::Failed,
                            });
                            (hooks.on_failed)();
                            break;
                        }

                        status_tx.send_replace(PollerStatus {
                            phase: PollPhase::Polling,
                            attempts_made,
                            remaining_seconds: config.remaining_seconds(attempts_made),
                            ticket_status: TicketStatus::Pending,
                        });
                    }
                }
            }

            running.store(false, Ordering::SeqCst);
            debug!(ticket_id = %ticket_id, "Confirmation poller stopped");
        });
    }
}
