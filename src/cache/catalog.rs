//! Catalog lookups kept indefinitely.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{ItemTypeInfo, LocationInfo, StationId, TypeId};
use crate::error::Result;
use crate::port::{get_json, put_json, CatalogOracle, KeyValueStore};

/// Station metadata under `location-info#<station>`.
pub struct LocationCache {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogOracle>,
}

impl LocationCache {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<dyn CatalogOracle>) -> Self {
        Self { store, catalog }
    }

    pub async fn location(&self, station_id: StationId) -> Result<LocationInfo> {
        let key = format!("location-info#{station_id}");
        if let Some(info) = get_json(self.store.as_ref(), &key).await? {
            return Ok(info);
        }
        debug!(%station_id, "Location cache miss");
        let info = self.catalog.lookup_location(station_id).await?;
        put_json(self.store.as_ref(), &key, &info, None).await?;
        Ok(info)
    }
}

/// Item type metadata under `item-info#<type>`.
pub struct ItemTypeCache {
    store: Arc<dyn KeyValueStore>,
    catalog: Arc<dyn CatalogOracle>,
}

impl ItemTypeCache {
    pub fn new(store: Arc<dyn KeyValueStore>, catalog: Arc<dyn CatalogOracle>) -> Self {
        Self { store, catalog }
    }

    pub async fn item_type(&self, type_id: TypeId) -> Result<ItemTypeInfo> {
        let key = format!("item-info#{type_id}");
        if let Some(info) = get_json(self.store.as_ref(), &key).await? {
            return Ok(info);
        }
        let info = self.catalog.lookup_item_type(type_id).await?;
        put_json(self.store.as_ref(), &key, &info, None).await?;
        Ok(info)
    }
}
