//! Policy configuration for the station classifier.

use serde::Deserialize;

/// Numeric boundaries of the decision policy.
///
/// Monetary values are ISK, volumes are packaged m3.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Island stations with more items than this need a dedicated trip.
    pub island_high_count_items: usize,
    /// Buy value below which a station is not worth acting on.
    pub min_collateral: f64,
    /// More items than this cannot be contracted by hand.
    pub high_count_items: usize,
    pub logistics_min_buy: f64,
    pub logistics_max_jumps: i64,
    /// Volume at or below this fits a public courier.
    pub small_volume_max: f64,
    pub high_value_sell: f64,
    /// Largest volume a single freighter carries.
    pub freighter_capacity: f64,
    pub long_haul_min_jumps: i64,
    pub long_haul_min_volume: f64,
    pub long_haul_min_sell: f64,
    pub freighter_min_sell: f64,
    pub freighter_max_sell: f64,
    /// Collateral ceiling for freighter contracts.
    pub collateral_cap: f64,
    /// Primary-hub routes up to this many jumps are preferred.
    pub preferred_route_max_jumps: i64,
    /// Express haulers only take routes shorter than this.
    pub express_max_jumps: i64,
    pub fee_per_jump: f64,
    pub express_min_fee: f64,
    pub express_extra_jumps: i64,
    pub long_haul_extra_jumps: i64,
    /// Hauling cost above this share of value gets no guidance.
    pub max_fee_ratio: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            island_high_count_items: 3_000,
            min_collateral: 100_000_000.0,
            high_count_items: 500,
            logistics_min_buy: 3_000_000_000.0,
            logistics_max_jumps: 30,
            small_volume_max: 62_500.0,
            high_value_sell: 10_000_000_000.0,
            freighter_capacity: 845_000.0,
            long_haul_min_jumps: 30,
            long_haul_min_volume: 600_000.0,
            long_haul_min_sell: 1_400_000_000.0,
            freighter_min_sell: 500_000_000.0,
            freighter_max_sell: 1_550_000_000.0,
            collateral_cap: 1_500_000_000.0,
            preferred_route_max_jumps: 20,
            express_max_jumps: 20,
            fee_per_jump: 1_000_000.0,
            express_min_fee: 4_500_000.0,
            express_extra_jumps: 1,
            long_haul_extra_jumps: 5,
            max_fee_ratio: 0.02,
        }
    }
}

/// Courier provider labels written into results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Providers {
    pub bulky: String,
    pub long_haul: String,
    pub express: String,
    pub public: String,
}

impl Default for Providers {
    fn default() -> Self {
        Self {
            bulky: "bulky".into(),
            long_haul: "Red Frog Freight".into(),
            express: "Push Industries".into(),
            public: "Public".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassifierConfig {
    /// Ids above this belong to player-owned structures.
    #[serde(default = "default_npc_station_max_id")]
    pub npc_station_max_id: i64,

    #[serde(default = "default_min_security")]
    pub min_security: f64,

    /// Types that may never be moved by courier.
    #[serde(default = "default_capital_ship_types")]
    pub capital_ship_types: Vec<i64>,

    /// System of the hub used for distance checks and bulky guidance.
    #[serde(default = "default_primary_hub_system")]
    pub primary_hub_system: String,

    /// Station name of the primary hub.
    #[serde(default = "default_primary_hub_station")]
    pub primary_hub_station: String,

    #[serde(default = "default_exchange_recipient")]
    pub exchange_recipient: String,

    #[serde(default = "default_exchange_reason")]
    pub exchange_reason: String,

    #[serde(default = "default_bulky_guidance")]
    pub bulky_guidance: String,

    #[serde(default)]
    pub providers: Providers,

    #[serde(default)]
    pub thresholds: Thresholds,
}

fn default_npc_station_max_id() -> i64 {
    61_000_000
}

fn default_min_security() -> f64 {
    0.45
}

fn default_capital_ship_types() -> Vec<i64> {
    vec![
        28_606, // Orca
        34_328, // Bowhead
        20_185, // Charon
        20_187, // Obelisk
        20_189, // Fenrir
        20_183, // Providence
    ]
}

fn default_primary_hub_system() -> String {
    "Jita".into()
}

fn default_primary_hub_station() -> String {
    "Jita IV - Moon 4 - Caldari Navy Assembly Plant".into()
}

fn default_exchange_recipient() -> String {
    "Lurbu Orlenard".into()
}

fn default_exchange_reason() -> String {
    "contains_fitted_ship".into()
}

fn default_bulky_guidance() -> String {
    "This station contains more than we can fit in a freighter. Please pick some items to \
     fill a freighter courier (up to 845km3) with close to 1.5b ISK in value if possible. \
     If you can put at least 1.4b ISK in, send it straight to Jita, otherwise send it to \
     the nearest hub."
        .into()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            npc_station_max_id: default_npc_station_max_id(),
            min_security: default_min_security(),
            capital_ship_types: default_capital_ship_types(),
            primary_hub_system: default_primary_hub_system(),
            primary_hub_station: default_primary_hub_station(),
            exchange_recipient: default_exchange_recipient(),
            exchange_reason: default_exchange_reason(),
            bulky_guidance: default_bulky_guidance(),
            providers: Providers::default(),
            thresholds: Thresholds::default(),
        }
    }
}
