//! Partition resolved items into per-station bundles.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use super::ids::StationId;
use super::item::{ResolvedItem, StationBundle};

/// Filters applied while grouping.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupingConfig {
    /// Stations below this id are synthetic locations (space, ships, etc).
    #[serde(default = "default_min_station_id")]
    pub min_station_id: i64,

    /// Trade hubs and other stations that never need action.
    #[serde(default = "default_ignored_stations")]
    pub ignored_stations: Vec<i64>,
}

fn default_min_station_id() -> i64 {
    60_000_000
}

fn default_ignored_stations() -> Vec<i64> {
    vec![
        60_003_760, // Jita IV - Moon 4 - Caldari Navy Assembly Plant
        60_005_686, // Hek VIII - Moon 12 - Boundless Creation Factory
        60_004_588, // Rens VI - Moon 8 - Brutor Tribe Treasury
        60_008_494, // Amarr VIII (Oris) - Emperor Family Academy
        60_011_866, // Dodixie IX - Moon 20 - Federation Navy Assembly Plant
        60_012_355, // Arlulf III - Moon 10 - CONCORD Bureau
    ]
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            min_station_id: default_min_station_id(),
            ignored_stations: default_ignored_stations(),
        }
    }
}

/// Groups resolved items by station, dropping non-actionable ones.
pub struct StationGrouper {
    min_station_id: i64,
    ignored: HashSet<i64>,
}

impl StationGrouper {
    pub fn new(config: &GroupingConfig) -> Self {
        Self {
            min_station_id: config.min_station_id,
            ignored: config.ignored_stations.iter().copied().collect(),
        }
    }

    /// Whether items at `station` survive the filters.
    #[must_use]
    pub fn accepts(&self, station: StationId) -> bool {
        station.get() >= self.min_station_id && !self.ignored.contains(&station.get())
    }

    /// Partition `items` into bundles keyed by station.
    ///
    /// Items keep their snapshot order within a bundle. Stations left with
    /// no items are absent from the result.
    pub fn group(&self, items: Vec<ResolvedItem>) -> BTreeMap<StationId, StationBundle> {
        let total = items.len();
        let mut bundles: BTreeMap<StationId, StationBundle> = BTreeMap::new();

        for resolved in items {
            let Some(station_id) = resolved.station_id.filter(|s| self.accepts(*s)) else {
                continue;
            };
            bundles
                .entry(station_id)
                .or_insert_with(|| StationBundle {
                    station_id,
                    items: Vec::new(),
                })
                .items
                .push(resolved);
        }

        debug!(
            items = total,
            stations = bundles.len(),
            "Grouped items by station"
        );
        bundles
    }
}
