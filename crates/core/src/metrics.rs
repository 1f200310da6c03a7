//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Confirmation poller (probes, errors, terminal outcomes)
//! - Registrations and tickets
//! - External auction service calls

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Confirmation Poller Metrics
// =============================================================================

/// Status probes made, across all pollers.
pub static PROBES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new("gavel_probes_total", "Total ticket status probes").unwrap()
});

/// Probes that returned a transport or server error.
pub static PROBE_ERRORS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gavel_probe_errors_total",
        "Total ticket status probes that failed",
    )
    .unwrap()
});

/// Pollers that reached the Confirmed phase.
pub static CONFIRMATIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gavel_confirmations_total",
        "Total payments confirmed by polling",
    )
    .unwrap()
});

/// Pollers that exhausted the attempt budget.
pub static EXHAUSTIONS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gavel_exhaustions_total",
        "Total confirmation windows exhausted without payment",
    )
    .unwrap()
});

// =============================================================================
// Registration Metrics
// =============================================================================

/// Registrations created total.
pub static REGISTRATIONS_CREATED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "gavel_registrations_created_total",
        "Total registrations created",
    )
    .unwrap()
});

/// Tickets issued total by result.
pub static TICKETS_ISSUED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gavel_tickets_issued_total", "Total ticket issue requests"),
        &["result"], // "success", "error"
    )
    .unwrap()
});

/// Receipts exported total by result.
pub static RECEIPTS_EXPORTED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "gavel_receipts_exported_total",
            "Total receipt export requests",
        ),
        &["result"], // "success", "error"
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External auction service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "gavel_external_service_duration_seconds",
            "Duration of auction service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["operation"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Poller
        Box::new(PROBES_TOTAL.clone()),
        Box::new(PROBE_ERRORS_TOTAL.clone()),
        Box::new(CONFIRMATIONS_TOTAL.clone()),
        Box::new(EXHAUSTIONS_TOTAL.clone()),
        // Registrations
        Box::new(REGISTRATIONS_CREATED.clone()),
        Box::new(TICKETS_ISSUED.clone()),
        Box::new(RECEIPTS_EXPORTED.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
    ]
}
