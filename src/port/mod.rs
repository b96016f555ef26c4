//! Capability traits (hexagonal ports). Depend only on domain.
//!
//! The classification core talks to the outside world exclusively through
//! these traits. Adapters in [`crate::adapter`] implement them against the
//! real services, and `testkit` provides in-memory fakes.
//!
//! # Available Ports
//!
//! - [`InventorySource`] - Point-in-time asset snapshot
//! - [`CatalogOracle`] - Station and item-type metadata
//! - [`PricingOracle`] - Bundle valuation and appraisal links
//! - [`RoutingOracle`] - Jump distances between systems
//! - [`TopologyOracle`] - Whether a system connects to the hub network
//! - [`KeyValueStore`] - Exact-key storage backing the caches
//! - [`ResultSink`] - Persistence of results and job status

mod oracle;
mod sink;
mod source;
mod store;

pub use oracle::{CatalogOracle, PricingOracle, RoutingOracle, TopologyOracle};
pub use sink::{KvResultSink, ResultSink};
pub use source::InventorySource;
pub use store::{get_json, put_json, KeyValueStore};
