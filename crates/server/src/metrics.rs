//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the gavel server:
//! - HTTP request metrics (counts)
//! - Live registration and poller gauges (collected dynamically)
//! - Core poller/registration counters re-registered from gavel-core

use once_cell::sync::Lazy;
use prometheus::{self, Encoder, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("gavel_http_requests_total", "Total HTTP requests"),
        &["method", "status"],
    )
    .unwrap()
});

// =============================================================================
// Registration Metrics (collected dynamically)
// =============================================================================

/// Registrations currently live in memory.
pub static REGISTRATIONS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "gavel_registrations_active",
        "Number of live registration flows",
    )
    .unwrap()
});

/// Confirmation pollers currently tracked.
pub static POLLERS_ACTIVE: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "gavel_pollers_active",
        "Number of tracked confirmation pollers",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(REGISTRATIONS_ACTIVE.clone()))
        .unwrap();
    registry
        .register(Box::new(POLLERS_ACTIVE.clone()))
        .unwrap();

    // Core metrics (poller, registrations, external services)
    for metric in gavel_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Collect dynamic metrics from current application state.
///
/// Called before encoding so the gauges reflect the live maps.
pub async fn collect_dynamic_metrics(state: &crate::state::AppState) {
    REGISTRATIONS_ACTIVE.set(state.registrations().len().await as i64);
    POLLERS_ACTIVE.set(state.poller_registry().len().await as i64);
}
