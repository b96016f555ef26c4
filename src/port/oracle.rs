//! External oracle ports.
//!
//! All oracles are trusted as given. Transient failures are retried inside
//! the adapters; what surfaces here fails only the station being processed.

use async_trait::async_trait;

use crate::domain::{
    AppraisalLine, Hub, ItemTypeInfo, LocationInfo, RouteInfo, StationId, TypeId, ValuationTotals,
};
use crate::error::Result;

/// Static catalog of locations and item types.
///
/// Answers never change for a given id, so callers may cache them forever.
#[async_trait]
pub trait CatalogOracle: Send + Sync {
    async fn lookup_location(&self, station_id: StationId) -> Result<LocationInfo>;

    async fn lookup_item_type(&self, type_id: TypeId) -> Result<ItemTypeInfo>;
}

/// Market pricing service.
#[async_trait]
pub trait PricingOracle: Send + Sync {
    /// Total buy, sell and volume for a `(type, quantity)` multiset.
    async fn appraise(&self, items: &[(TypeId, i64)]) -> Result<ValuationTotals>;

    /// Create a shareable appraisal and return its link.
    async fn appraisal_link(&self, lines: &[AppraisalLine]) -> Result<String>;
}

/// Route calculator between solar systems.
#[async_trait]
pub trait RoutingOracle: Send + Sync {
    /// Route from `origin_system` to `hub`, or `None` if no route exists.
    async fn route(&self, origin_system: &str, hub: &Hub) -> Result<Option<RouteInfo>>;
}

/// Knowledge of which systems connect to the hub network.
#[async_trait]
pub trait TopologyOracle: Send + Sync {
    async fn is_mainland_connected(&self, system_name: &str) -> Result<bool>;
}
