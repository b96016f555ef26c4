//! In-memory port implementations for tests.
//!
//! Every fake counts its calls so tests can assert on cache behaviour,
//! and most can be told to fail for specific keys.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use super::domain::location;
use crate::domain::{
    AppraisalLine, Hub, InventoryItem, ItemTypeInfo, LocationInfo, RouteInfo, StationId, TypeId,
    ValuationTotals,
};
use crate::error::{Error, Result};
use crate::port::{CatalogOracle, InventorySource, PricingOracle, RoutingOracle, TopologyOracle};

/// Fixed snapshot, or an unreachable source.
pub struct FakeInventory {
    items: Option<Vec<InventoryItem>>,
}

impl FakeInventory {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        Self { items: Some(items) }
    }

    pub fn unavailable() -> Self {
        Self { items: None }
    }
}

#[async_trait]
impl InventorySource for FakeInventory {
    async fn fetch_all_items(&self) -> Result<Vec<InventoryItem>> {
        self.items
            .clone()
            .ok_or_else(|| Error::SourceUnavailable("inventory offline".into()))
    }
}

/// Catalog with configured locations and ship types.
///
/// Unknown locations fail; unknown types resolve to a non-ship named
/// `"Type <id>"`.
#[derive(Default)]
pub struct FakeCatalog {
    locations: HashMap<StationId, LocationInfo>,
    ships: HashMap<TypeId, String>,
    location_calls: AtomicUsize,
    type_calls: AtomicUsize,
}

impl FakeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_location(self, station_id: i64, system_name: &str, security: f64) -> Self {
        self.with_location_info(location(station_id, system_name, security))
    }

    #[must_use]
    pub fn with_location_info(mut self, info: LocationInfo) -> Self {
        self.locations.insert(info.station_id, info);
        self
    }

    #[must_use]
    pub fn with_ship(mut self, type_id: i64, name: &str) -> Self {
        self.ships.insert(TypeId::new(type_id), name.to_string());
        self
    }

    pub fn location_calls(&self) -> usize {
        self.location_calls.load(Ordering::SeqCst)
    }

    pub fn type_calls(&self) -> usize {
        self.type_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CatalogOracle for FakeCatalog {
    async fn lookup_location(&self, station_id: StationId) -> Result<LocationInfo> {
        self.location_calls.fetch_add(1, Ordering::SeqCst);
        self.locations
            .get(&station_id)
            .cloned()
            .ok_or_else(|| Error::Oracle(format!("unknown station {station_id}")))
    }

    async fn lookup_item_type(&self, type_id: TypeId) -> Result<ItemTypeInfo> {
        self.type_calls.fetch_add(1, Ordering::SeqCst);
        Ok(match self.ships.get(&type_id) {
            Some(name) => ItemTypeInfo {
                type_id,
                name: name.clone(),
                is_ship: true,
            },
            None => ItemTypeInfo {
                type_id,
                name: format!("Type {type_id}"),
                is_ship: false,
            },
        })
    }
}

/// Prices every unit of every type the same.
pub struct CountingPricing {
    unit: ValuationTotals,
    /// Stations whose bundles contain this type fail to price.
    poison: Option<TypeId>,
    calls: AtomicUsize,
    link_calls: AtomicUsize,
}

impl CountingPricing {
    pub fn new(buy: f64, sell: f64, volume: f64) -> Self {
        Self {
            unit: ValuationTotals { buy, sell, volume },
            poison: None,
            calls: AtomicUsize::new(0),
            link_calls: AtomicUsize::new(0),
        }
    }

    /// Fail any appraisal that includes `type_id`.
    #[must_use]
    pub fn failing_on(mut self, type_id: i64) -> Self {
        self.poison = Some(TypeId::new(type_id));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn link_calls(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PricingOracle for CountingPricing {
    async fn appraise(&self, items: &[(TypeId, i64)]) -> Result<ValuationTotals> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(poison) = self.poison {
            if items.iter().any(|(t, _)| *t == poison) {
                return Err(Error::Oracle(format!("cannot price type {poison}")));
            }
        }
        let units: i64 = items.iter().map(|(_, q)| q).sum();
        let units = units as f64;
        Ok(ValuationTotals {
            buy: self.unit.buy * units,
            sell: self.unit.sell * units,
            volume: self.unit.volume * units,
        })
    }

    async fn appraisal_link(&self, lines: &[AppraisalLine]) -> Result<String> {
        let n = self.link_calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("https://appraisal.test/a/{n}-{}", lines.len()))
    }
}

/// Routes keyed by `(origin, destination system)`.
#[derive(Default)]
pub struct FakeRouting {
    routes: HashMap<(String, String), i64>,
    broken: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeRouting {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_route(mut self, origin: &str, destination: &str, jumps: i64) -> Self {
        self.routes
            .insert((origin.to_string(), destination.to_string()), jumps);
        self
    }

    /// Every request towards `destination` fails.
    #[must_use]
    pub fn failing_to(mut self, destination: &str) -> Self {
        self.broken.insert(destination.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RoutingOracle for FakeRouting {
    async fn route(&self, origin_system: &str, hub: &Hub) -> Result<Option<RouteInfo>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.broken.contains(&hub.system_name) {
            return Err(Error::OracleTransient(format!("route to {} timed out", hub.system_name)));
        }
        let key = (origin_system.to_string(), hub.system_name.clone());
        Ok(self.routes.get(&key).map(|&jumps| RouteInfo {
            origin_system: origin_system.to_string(),
            destination_system: hub.system_name.clone(),
            destination_label: hub.label.clone(),
            jumps,
        }))
    }
}

/// Every system is mainland except the listed islands.
#[derive(Default)]
pub struct FakeTopology {
    islands: HashSet<String>,
    asked: Mutex<Vec<String>>,
}

impl FakeTopology {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_island(mut self, system_name: &str) -> Self {
        self.islands.insert(system_name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.asked.lock().len()
    }

    /// Systems asked about, in call order.
    pub fn asked(&self) -> Vec<String> {
        self.asked.lock().clone()
    }
}

#[async_trait]
impl TopologyOracle for FakeTopology {
    async fn is_mainland_connected(&self, system_name: &str) -> Result<bool> {
        self.asked.lock().push(system_name.to_string());
        Ok(!self.islands.contains(system_name))
    }
}
