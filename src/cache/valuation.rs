//! Valuation memoized by bundle contents.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{Fingerprint, StationBundle, StationId, ValuationTotals};
use crate::error::Result;
use crate::port::{get_json, put_json, KeyValueStore, PricingOracle};

#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    station_id: StationId,
    fingerprint: Fingerprint,
    totals: ValuationTotals,
}

/// Prices a station's bundle, skipping the oracle while the bundle's
/// `(type, quantity)` multiset is unchanged.
///
/// One entry per station under `snapshots#<station>`; a fingerprint
/// mismatch overwrites it.
pub struct ValuationCache {
    store: Arc<dyn KeyValueStore>,
    pricing: Arc<dyn PricingOracle>,
    ttl: Duration,
}

impl ValuationCache {
    pub fn new(store: Arc<dyn KeyValueStore>, pricing: Arc<dyn PricingOracle>, ttl: Duration) -> Self {
        Self { store, pricing, ttl }
    }

    fn key(station_id: StationId) -> String {
        format!("snapshots#{station_id}")
    }

    pub async fn totals(&self, bundle: &StationBundle) -> Result<ValuationTotals> {
        let key = Self::key(bundle.station_id);
        let fingerprint = Fingerprint::of(bundle.type_quantities());

        if let Some(snapshot) = get_json::<Snapshot>(self.store.as_ref(), &key).await? {
            if snapshot.fingerprint == fingerprint {
                debug!(station_id = %bundle.station_id, "Valuation cache hit");
                return Ok(snapshot.totals);
            }
        }

        debug!(station_id = %bundle.station_id, "Valuation cache miss");
        let items: Vec<_> = bundle.type_quantities().collect();
        let totals = self.pricing.appraise(&items).await?.sanitized();
        let snapshot = Snapshot {
            station_id: bundle.station_id,
            fingerprint,
            totals,
        };
        put_json(self.store.as_ref(), &key, &snapshot, Some(self.ttl)).await?;
        Ok(totals)
    }
}
