//! Couriers - classify a corporation's scattered hangar contents into
//! hauling actions.
//!
//! A run takes the corporation's inventory snapshot, resolves every item
//! to the station it ultimately sits in, prices and routes each station's
//! bundle, and sorts the station into a category such as "public
//! courier", "freighter contract" or "problem".
//!
//! # Modules
//!
//! - [`domain`] - Pure types and algorithms: resolver, grouper, classifier
//! - [`port`] - Traits for the inventory source, oracles and storage
//! - [`cache`] - Cache-aside valuation, route and catalog lookups
//! - [`adapter`] - HTTP clients, in-memory store, retry policy
//! - [`app`] - Station pipeline, run fan-out and result queries
//! - [`config`] - TOML configuration and logging setup
//! - [`error`] - Error types for the crate
//! - [`cli`] - Command-line entry points
//!
//! # Example
//!
//! ```no_run
//! use couriers::domain::{resolve_stations, GroupingConfig, InventoryItem, StationGrouper};
//!
//! let snapshot = vec![
//!     InventoryItem::new(1, 60_001_000, 34, 100),
//!     InventoryItem::new(2, 1, 35, 10),
//! ];
//! let resolved = resolve_stations(&snapshot).unwrap();
//! let bundles = StationGrouper::new(&GroupingConfig::default()).group(resolved);
//! assert_eq!(bundles.len(), 1);
//! ```

pub mod adapter;
pub mod app;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
