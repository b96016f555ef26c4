//! Station resolution over the flat containment graph.
//!
//! Every inventory record points at its container. A record whose
//! container is not itself a known record is a root: its container is an
//! external location (station, structure, or something we cannot see).
//! Walking container references from any record ends at a root, and the
//! root's container is the station holding the record.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::ids::{ItemId, StationId};
use super::item::{InventoryItem, ResolvedItem};
use crate::error::{Error, Result};

/// Index over one snapshot used to resolve stations.
pub struct LocationResolver<'a> {
    items: HashMap<i64, &'a InventoryItem>,
    accessible: HashSet<i64>,
}

impl<'a> LocationResolver<'a> {
    /// Build the item index and the accessible-locations set.
    pub fn new(snapshot: &'a [InventoryItem]) -> Self {
        let items: HashMap<i64, &InventoryItem> = snapshot
            .iter()
            .map(|item| (item.item_id.get(), item))
            .collect();

        let accessible = items
            .values()
            .filter(|item| !items.contains_key(&item.container_id))
            .map(|item| item.container_id)
            .collect();

        Self { items, accessible }
    }

    /// Whether `item_id`'s container is outside the snapshot.
    #[must_use]
    pub fn is_root(&self, item_id: ItemId) -> bool {
        self.items
            .get(&item_id.get())
            .is_some_and(|item| !self.items.contains_key(&item.container_id))
    }

    /// Resolve one record's station.
    ///
    /// Returns [`Error::CycleDetected`] when the container chain revisits a
    /// record.
    pub fn station_of(&self, item: &InventoryItem) -> Result<Option<StationId>> {
        self.walk(item, &mut HashMap::new())
    }

    /// Resolve every record of the snapshot, preserving order.
    pub fn resolve_all(&self, snapshot: &[InventoryItem]) -> Result<Vec<ResolvedItem>> {
        let mut memo = HashMap::with_capacity(self.items.len());
        let resolved = snapshot
            .iter()
            .map(|item| {
                self.walk(item, &mut memo).map(|station_id| ResolvedItem {
                    item: item.clone(),
                    station_id,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            items = resolved.len(),
            unresolved = resolved.iter().filter(|r| r.station_id.is_none()).count(),
            "Resolved snapshot stations"
        );
        Ok(resolved)
    }

    fn walk(
        &self,
        start: &InventoryItem,
        memo: &mut HashMap<i64, Option<StationId>>,
    ) -> Result<Option<StationId>> {
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        let mut current = start;

        let station = loop {
            let id = current.item_id.get();
            if let Some(known) = memo.get(&id) {
                break *known;
            }
            if !on_path.insert(id) {
                return Err(Error::CycleDetected { item_id: id });
            }
            path.push(id);

            match self.items.get(&current.container_id) {
                Some(container) => current = *container,
                None if self.accessible.contains(&current.container_id) => {
                    break Some(StationId::new(current.container_id));
                }
                None => break None,
            }
        };

        for id in path {
            memo.insert(id, station);
        }
        Ok(station)
    }
}

/// Resolve every record of a snapshot to its station.
pub fn resolve_stations(snapshot: &[InventoryItem]) -> Result<Vec<ResolvedItem>> {
    LocationResolver::new(snapshot).resolve_all(snapshot)
}
