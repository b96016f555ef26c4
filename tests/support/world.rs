//! A small corporation hangar spread over a handful of stations, wired to
//! fakes through the real composition root.

use std::sync::Arc;

use couriers::adapter::MemoryStore;
use couriers::app::{Oracles, Services};
use couriers::config::Config;
use couriers::domain::InventoryItem;
use couriers::port::KeyValueStore;
use couriers::testkit::config::hubs;
use couriers::testkit::fakes::{
    CountingPricing, FakeCatalog, FakeInventory, FakeRouting, FakeTopology,
};

/// Mainland highsec station, public-courier sized.
pub const PERIMETER: i64 = 60_001_000;
/// Island station with a huge item count.
pub const FARAWAY: i64 = 60_002_000;
pub const LOWSEC: i64 = 60_003_000;
/// No catalog entry: its lookup fails.
pub const UNKNOWN: i64 = 60_004_000;
/// Mainland station worth too little to act on.
pub const CHEAP: i64 = 60_005_000;
pub const STRUCTURE: i64 = 1_035_000_000_000;
pub const JITA_HUB: i64 = 60_003_760;

/// Every unit is worth 300k buy, 320k sell and 100 m3.
pub const UNIT_BUY: f64 = 300_000.0;
pub const UNIT_SELL: f64 = 320_000.0;
pub const UNIT_VOLUME: f64 = 100.0;

/// Sequential item ids for snapshot construction.
pub struct Snapshot {
    next_id: i64,
    pub items: Vec<InventoryItem>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self {
            next_id: 1_000_000,
            items: Vec::new(),
        }
    }

    /// Add one record and return its item id.
    pub fn add(&mut self, container: i64, type_id: i64, quantity: i64) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items
            .push(InventoryItem::new(id, container, type_id, quantity));
        id
    }

    /// Add `records` stacks of `quantity` units each.
    pub fn stacks(&mut self, container: i64, records: usize, quantity: i64) {
        for _ in 0..records {
            self.add(container, 34, quantity);
        }
    }
}

/// The hangar used by most runner tests.
pub fn hangar() -> Vec<InventoryItem> {
    let mut snapshot = Snapshot::new();
    // 500 units: buy 150M, sell 160M, 50 000 m3.
    snapshot.stacks(PERIMETER, 5, 100);
    snapshot.stacks(FARAWAY, 3_500, 1);
    snapshot.stacks(LOWSEC, 2, 1_000);
    snapshot.stacks(UNKNOWN, 3, 1_000);
    // Ten units, one level deep inside a container.
    let crate_id = snapshot.add(CHEAP, 3_467, 1);
    snapshot.add(crate_id, 34, 9);
    snapshot.stacks(STRUCTURE, 2, 5);
    snapshot.stacks(JITA_HUB, 10, 1_000);
    snapshot.items
}

pub struct World {
    pub config: Config,
    pub store: Arc<dyn KeyValueStore>,
    pub catalog: Arc<FakeCatalog>,
    pub pricing: Arc<CountingPricing>,
    pub routing: Arc<FakeRouting>,
    pub topology: Arc<FakeTopology>,
}

impl World {
    pub fn new() -> Self {
        let mut config = Config::default();
        config.hubs = hubs();
        Self {
            config,
            store: Arc::new(MemoryStore::new()),
            catalog: Arc::new(
                FakeCatalog::new()
                    .with_location(PERIMETER, "Perimeter", 0.6)
                    .with_location(FARAWAY, "Faraway", 0.9)
                    .with_location(LOWSEC, "Lowsec", 0.3)
                    .with_location(CHEAP, "Cheap", 0.9),
            ),
            pricing: Arc::new(CountingPricing::new(UNIT_BUY, UNIT_SELL, UNIT_VOLUME)),
            routing: Arc::new(
                FakeRouting::new()
                    .with_route("Perimeter", "Jita", 10)
                    .with_route("Perimeter", "Amarr", 3)
                    .with_route("Cheap", "Jita", 5),
            ),
            topology: Arc::new(FakeTopology::new().with_island("Faraway")),
        }
    }

    pub fn services(&self, source: FakeInventory) -> Services {
        let oracles = Oracles {
            source: Arc::new(source),
            catalog: self.catalog.clone(),
            pricing: self.pricing.clone(),
            routing: self.routing.clone(),
            topology: self.topology.clone(),
        };
        Services::build(&self.config, oracles, self.store.clone())
    }
}
