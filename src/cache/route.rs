//! Hub routes memoized forever.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{Hub, RouteInfo};
use crate::error::Result;
use crate::port::{get_json, put_json, KeyValueStore, RoutingOracle};

/// Routes are static topology, so found routes never expire. A missing
/// route is not stored and is asked again next time.
pub struct RouteCache {
    store: Arc<dyn KeyValueStore>,
    routing: Arc<dyn RoutingOracle>,
}

impl RouteCache {
    pub fn new(store: Arc<dyn KeyValueStore>, routing: Arc<dyn RoutingOracle>) -> Self {
        Self { store, routing }
    }

    fn key(origin: &str, destination: &str) -> String {
        format!("route#{origin}#{destination}")
    }

    pub async fn route(&self, origin_system: &str, hub: &Hub) -> Result<Option<RouteInfo>> {
        let key = Self::key(origin_system, &hub.system_name);
        if let Some(route) = get_json::<RouteInfo>(self.store.as_ref(), &key).await? {
            debug!(origin = origin_system, destination = %hub.system_name, "Route cache hit");
            return Ok(Some(route));
        }

        let route = self.routing.route(origin_system, hub).await?;
        if let Some(found) = &route {
            put_json(self.store.as_ref(), &key, found, None).await?;
        }
        Ok(route)
    }
}
