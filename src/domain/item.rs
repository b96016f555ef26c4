//! Inventory snapshot records.

use serde::{Deserialize, Serialize};

use super::ids::{ItemId, StationId, TypeId};

/// One record of a point-in-time inventory snapshot.
///
/// `container_id` is either another item's id (the record sits inside a
/// container) or an external location such as a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub container_id: i64,
    pub quantity: i64,
    pub type_id: TypeId,
    pub is_singleton: bool,
}

impl InventoryItem {
    pub fn new(item_id: i64, container_id: i64, type_id: i64, quantity: i64) -> Self {
        Self {
            item_id: ItemId::new(item_id),
            container_id,
            quantity,
            type_id: TypeId::new(type_id),
            is_singleton: false,
        }
    }

    /// Mark the record as an assembled (non-stacked) item.
    #[must_use]
    pub fn singleton(mut self) -> Self {
        self.is_singleton = true;
        self
    }
}

/// An inventory record together with the station it ultimately sits in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedItem {
    pub item: InventoryItem,
    /// `None` when the containment chain never reaches an accessible root.
    pub station_id: Option<StationId>,
}

/// All items resolved to one station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationBundle {
    pub station_id: StationId,
    pub items: Vec<ResolvedItem>,
}

impl StationBundle {
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// `(type, quantity)` pairs in bundle order.
    pub fn type_quantities(&self) -> impl Iterator<Item = (TypeId, i64)> + '_ {
        self.items.iter().map(|r| (r.item.type_id, r.item.quantity))
    }

    /// Items not stacked with others, candidates for assembled ships.
    pub fn singletons(&self) -> impl Iterator<Item = &InventoryItem> + '_ {
        self.items
            .iter()
            .map(|r| &r.item)
            .filter(|item| item.is_singleton)
    }
}
