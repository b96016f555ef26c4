//! Composition of runner and query from configuration.

use std::sync::Arc;

use tracing::info;

use super::pipeline::{PipelineDeps, StationPipeline};
use super::query::ResultQuery;
use super::runner::ClassificationRunner;
use crate::adapter::{EsiClient, JaniceClient, MainlandClient, RedFrogClient};
use crate::cache::{ItemTypeCache, LocationCache, RouteCache, ValuationCache};
use crate::config::Config;
use crate::domain::{StationClassifier, StationGrouper};
use crate::error::Result;
use crate::port::{
    CatalogOracle, InventorySource, KeyValueStore, KvResultSink, PricingOracle, ResultSink,
    RoutingOracle, TopologyOracle,
};

/// External collaborators of a run.
#[derive(Clone)]
pub struct Oracles {
    pub source: Arc<dyn InventorySource>,
    pub catalog: Arc<dyn CatalogOracle>,
    pub pricing: Arc<dyn PricingOracle>,
    pub routing: Arc<dyn RoutingOracle>,
    pub topology: Arc<dyn TopologyOracle>,
}

impl Oracles {
    /// HTTP clients for the live services. Needs both credentials.
    #[allow(clippy::result_large_err)]
    pub fn http(config: &Config) -> Result<Self> {
        let esi = Arc::new(EsiClient::new(
            &config.endpoints.esi,
            config.secrets.esi_access_token()?,
            config.inventory.clone(),
            config.classifier.npc_station_max_id,
            &config.http,
            config.retry.clone(),
        )?);
        let pricing = Arc::new(JaniceClient::new(
            &config.endpoints.janice_api,
            &config.endpoints.janice_public,
            config.secrets.janice_api_key()?,
            &config.http,
            config.retry.clone(),
        )?);
        let routing = Arc::new(RedFrogClient::new(
            &config.endpoints.redfrog,
            &config.http,
            config.retry.clone(),
        )?);
        let topology = Arc::new(MainlandClient::new(
            &config.endpoints.mainland,
            &config.http,
            config.retry.clone(),
        )?);
        info!(corporation_id = config.inventory.corporation_id, "HTTP oracles initialized");

        Ok(Self {
            source: esi.clone(),
            catalog: esi,
            pricing,
            routing,
            topology,
        })
    }
}

/// Everything needed to run and read classifications.
pub struct Services {
    pub runner: ClassificationRunner,
    pub query: ResultQuery,
    pub sink: Arc<dyn ResultSink>,
}

impl Services {
    /// Wire caches, pipeline and runner over `store`.
    pub fn build(config: &Config, oracles: Oracles, store: Arc<dyn KeyValueStore>) -> Self {
        let deps = PipelineDeps {
            locations: LocationCache::new(store.clone(), oracles.catalog.clone()),
            item_types: ItemTypeCache::new(store.clone(), oracles.catalog),
            valuations: ValuationCache::new(
                store.clone(),
                oracles.pricing.clone(),
                config.cache.valuation_ttl(),
            ),
            routes: RouteCache::new(store.clone(), oracles.routing),
            pricing: oracles.pricing,
            topology: oracles.topology,
        };
        let pipeline = Arc::new(StationPipeline::new(
            StationClassifier::new(config.classifier.clone()),
            config.hubs.clone(),
            deps,
        ));

        let sink: Arc<dyn ResultSink> = Arc::new(KvResultSink::new(store));
        let runner = ClassificationRunner::new(
            oracles.source,
            StationGrouper::new(&config.grouping),
            pipeline,
            sink.clone(),
            config.cache.result_ttl(),
        );

        Self {
            runner,
            query: ResultQuery::new(sink.clone()),
            sink,
        }
    }
}
