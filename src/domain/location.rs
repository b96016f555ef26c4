//! Catalog metadata for stations and item types.

use serde::{Deserialize, Serialize};

use super::ids::{StationId, SystemId, TypeId};

/// Where a station is and how safe its system is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub station_id: StationId,
    pub system_id: SystemId,
    pub station_name: String,
    pub system_name: String,
    pub region_name: String,
    pub security_status: f64,
}

/// Static catalog entry for an item type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTypeInfo {
    pub type_id: TypeId,
    pub name: String,
    pub is_ship: bool,
}
