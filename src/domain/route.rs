//! Routes from a station's system to the trade hubs.

use serde::{Deserialize, Serialize};

use super::ids::{StationId, SystemId};

/// A trade hub that couriers are routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hub {
    /// Full station name used as the courier destination.
    pub label: String,
    pub system_name: String,
    pub system_id: SystemId,
    pub station_id: StationId,
}

/// Jump distance between two systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteInfo {
    pub origin_system: String,
    pub destination_system: String,
    /// Hub station the route ends at.
    pub destination_label: String,
    pub jumps: i64,
}

/// Routes from one origin to each reachable hub.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    routes: Vec<RouteInfo>,
}

impl RouteSet {
    pub fn new(routes: Vec<RouteInfo>) -> Self {
        Self { routes }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    #[must_use]
    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// The route ending in `system`, if reachable.
    #[must_use]
    pub fn to_system(&self, system: &str) -> Option<&RouteInfo> {
        self.routes.iter().find(|r| r.destination_system == system)
    }

    /// The route with the fewest jumps; ties keep the earlier hub.
    #[must_use]
    pub fn shortest(&self) -> Option<&RouteInfo> {
        self.routes.iter().min_by_key(|r| r.jumps)
    }
}
