//! Builders for domain primitives used across tests.
//!
//! Keep tests focused on assertions rather than construction boilerplate.

use crate::domain::{
    Hub, InventoryItem, LocationInfo, ResolvedItem, RouteInfo, RouteSet, StationBundle,
    StationFacts, StationId, SystemId, ValuationTotals,
};

/// Ordinary stackable type (Tritanium) used for filler items.
pub const FILLER_TYPE: i64 = 34;

/// Bundle of `n` stacked filler records at `station_id`.
pub fn bundle_of(station_id: i64, n: usize) -> StationBundle {
    bundle_with(station_id, vec![(FILLER_TYPE, 1, false); n])
}

/// Bundle from `(type_id, quantity, singleton)` triples.
pub fn bundle_with(station_id: i64, items: Vec<(i64, i64, bool)>) -> StationBundle {
    let station = StationId::new(station_id);
    let items = items
        .into_iter()
        .enumerate()
        .map(|(i, (type_id, quantity, singleton))| {
            let item = InventoryItem::new(1_000 + i as i64, station_id, type_id, quantity);
            ResolvedItem {
                item: if singleton { item.singleton() } else { item },
                station_id: Some(station),
            }
        })
        .collect();
    StationBundle {
        station_id: station,
        items,
    }
}

/// Hub in system `name`, labelled `"<name> hub"`.
pub fn hub(name: &str) -> Hub {
    let (system_id, station_id) = match name {
        "Jita" => (30_000_142, 60_003_760),
        "Hek" => (30_002_053, 60_005_686),
        "Rens" => (30_002_510, 60_004_588),
        "Amarr" => (30_002_187, 60_008_494),
        "Dodixie" => (30_002_659, 60_011_866),
        _ => (30_000_001, 60_000_001),
    };
    Hub {
        label: format!("{name} hub"),
        system_name: name.to_string(),
        system_id: SystemId::new(system_id),
        station_id: StationId::new(station_id),
    }
}

/// Route from the default origin to the hub in `destination`.
pub fn route(destination: &str, jumps: i64) -> RouteInfo {
    RouteInfo {
        origin_system: "Perimeter".into(),
        destination_system: destination.into(),
        destination_label: format!("{destination} hub"),
        jumps,
    }
}

/// Location record in a named system.
pub fn location(station_id: i64, system_name: &str, security_status: f64) -> LocationInfo {
    LocationInfo {
        station_id: StationId::new(station_id),
        system_id: SystemId::new(30_000_144),
        station_name: format!("{system_name} I - Test Station"),
        system_name: system_name.to_string(),
        region_name: "The Forge".into(),
        security_status,
    }
}

/// Fluent construction of [`StationFacts`] with chosen facts pre-filled.
pub struct FactsBuilder {
    facts: StationFacts,
}

impl FactsBuilder {
    pub fn new(bundle: StationBundle) -> Self {
        Self {
            facts: StationFacts::new(bundle),
        }
    }

    /// Replace the bundle, keeping every gathered fact.
    #[must_use]
    pub fn bundle(self, bundle: StationBundle) -> Self {
        let old = self.facts;
        let mut facts = StationFacts::new(bundle);
        facts.appraisal_link = old.appraisal_link;
        facts.location = old.location;
        facts.has_fitted_ship = old.has_fitted_ship;
        facts.totals = old.totals;
        facts.mainland = old.mainland;
        facts.routes = old.routes;
        Self { facts }
    }

    /// Move the bundle to another station id.
    #[must_use]
    pub fn station(self, station_id: i64) -> Self {
        let station = StationId::new(station_id);
        let mut bundle = self.facts.bundle().clone();
        bundle.station_id = station;
        for resolved in &mut bundle.items {
            resolved.item.container_id = station_id;
            resolved.station_id = Some(station);
        }
        self.bundle(bundle)
    }

    #[must_use]
    pub fn security(mut self, security_status: f64) -> Self {
        let station_id = self.facts.station_id().get();
        self.facts.location = Some(location(station_id, "Perimeter", security_status));
        self
    }

    #[must_use]
    pub fn totals(mut self, buy: f64, sell: f64, volume: f64) -> Self {
        self.facts.totals = Some(ValuationTotals { buy, sell, volume });
        self
    }

    #[must_use]
    pub fn mainland(mut self, connected: bool) -> Self {
        self.facts.mainland = Some(connected);
        self
    }

    #[must_use]
    pub fn routes(mut self, routes: Vec<RouteInfo>) -> Self {
        self.facts.routes = Some(RouteSet::new(routes));
        self
    }

    #[must_use]
    pub fn fitted_ship(mut self, fitted: bool) -> Self {
        self.facts.has_fitted_ship = Some(fitted);
        self
    }

    #[must_use]
    pub fn appraisal_link(mut self, link: &str) -> Self {
        self.facts.appraisal_link = Some(link.to_string());
        self
    }

    pub fn build(self) -> StationFacts {
        self.facts
    }
}
