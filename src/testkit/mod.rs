//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: builders for bundles, routes, hubs and classifier facts.
//! - [`fakes`]: in-memory oracles and inventory sources with call counters
//!   and failure injection.
//! - [`config`]: canonical test configurations (zero-delay retry, hubs).

pub mod config;
pub mod domain;
pub mod fakes;
