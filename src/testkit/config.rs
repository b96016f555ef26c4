//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.

use crate::adapter::RetryConfig;
use crate::domain::Hub;

use super::domain::hub;

/// Retry config with zero delays.
pub fn retry() -> RetryConfig {
    RetryConfig {
        max_retries: 2,
        initial_delay_ms: 0,
        backoff_multiplier: 1.0,
        max_delay_ms: 0,
    }
}

/// The five trade hubs, primary hub first.
pub fn hubs() -> Vec<Hub> {
    ["Jita", "Hek", "Rens", "Amarr", "Dodixie"]
        .into_iter()
        .map(hub)
        .collect()
}
