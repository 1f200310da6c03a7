//! Confirmation poller configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the payment confirmation poller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollerConfig {
    /// Probe cadence in milliseconds.
    #[serde(default = "default_interval")]
    pub interval_ms: u64,

    /// Fixed attempt budget. Every probe consumes one attempt regardless of
    /// its outcome; the poller gives up after this many.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

fn default_interval() -> u64 {
    3000 // 3 seconds
}

fn default_max_attempts() -> u32 {
    15 // 45 second budget at the default cadence
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl PollerConfig {
    /// Total confirmation window in whole seconds.
    pub fn total_budget_secs(&self) -> u64 {
        self.max_attempts as u64 * self.interval_ms / 1000
    }

    /// Countdown shown to the user after `attempts_made` probes.
    ///
    /// Purely presentational; never drives the state machine. Saturates at
    /// zero so the display can never go negative.
    pub fn remaining_seconds(&self, attempts_made: u32) -> u64 {
        let total_ms = self.max_attempts as u64 * self.interval_ms;
        total_ms.saturating_sub(attempts_made as u64 * self.interval_ms) / 1000
    }
}
