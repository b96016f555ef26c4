//! Per-station fact gathering and classification.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures_util::future::{join_all, try_join_all};
use tracing::{debug, info, warn};

use crate::cache::{ItemTypeCache, LocationCache, RouteCache, ValuationCache};
use crate::domain::{
    AppraisalLine, ClassificationResult, Decision, Fact, Hub, RouteSet, StationBundle,
    StationClassifier, StationFacts, StationId, TypeId,
};
use crate::error::{Error, Result};
use crate::port::{PricingOracle, TopologyOracle};

/// Collaborators a [`StationPipeline`] gathers facts from.
pub struct PipelineDeps {
    pub locations: LocationCache,
    pub item_types: ItemTypeCache,
    pub valuations: ValuationCache,
    pub routes: RouteCache,
    pub pricing: Arc<dyn PricingOracle>,
    pub topology: Arc<dyn TopologyOracle>,
}

/// Classifies one station at a time, fetching only the facts the
/// classifier asks for.
pub struct StationPipeline {
    classifier: StationClassifier,
    hubs: Vec<Hub>,
    deps: PipelineDeps,
}

impl StationPipeline {
    pub fn new(classifier: StationClassifier, hubs: Vec<Hub>, deps: PipelineDeps) -> Self {
        Self {
            classifier,
            hubs,
            deps,
        }
    }

    /// Classify `bundle`. `Ok(None)` is an intentionally ignored station.
    ///
    /// Any oracle failure is reported as [`Error::Classification`] for the
    /// station.
    pub async fn process(&self, bundle: StationBundle) -> Result<Option<ClassificationResult>> {
        let station_id = bundle.station_id;
        self.classify(bundle)
            .await
            .map_err(|err| station_failure(station_id, err))
    }

    async fn classify(&self, bundle: StationBundle) -> Result<Option<ClassificationResult>> {
        let mut facts = StationFacts::new(bundle);
        let mut gathered = HashSet::new();

        loop {
            match self.classifier.classify(&facts) {
                Decision::Needs(fact) => {
                    if !gathered.insert(fact) {
                        return Err(Error::Classification {
                            station_id: facts.station_id().get(),
                            reason: format!("{fact:?} still missing after gathering"),
                        });
                    }
                    self.gather(&mut facts, fact).await?;
                }
                Decision::Done { rule, result } => {
                    match &result {
                        Some(result) => debug!(
                            station_id = %facts.station_id(),
                            rule = rule.name(),
                            category = %result.category(),
                            "Station classified"
                        ),
                        None => info!(
                            station_id = %facts.station_id(),
                            rule = rule.name(),
                            "Station ignored"
                        ),
                    }
                    return Ok(result);
                }
            }
        }
    }

    async fn gather(&self, facts: &mut StationFacts, fact: Fact) -> Result<()> {
        let station_id = facts.station_id();
        match fact {
            Fact::AppraisalLink => {
                let link = self.appraisal_link(facts.bundle()).await?;
                facts.appraisal_link = Some(link);
            }
            Fact::Location => {
                facts.location = Some(self.deps.locations.location(station_id).await?);
            }
            Fact::FittedShip => {
                facts.has_fitted_ship = Some(self.has_fitted_ship(facts.bundle()).await?);
            }
            Fact::Valuation => {
                facts.totals = Some(self.deps.valuations.totals(facts.bundle()).await?);
            }
            Fact::Mainland => {
                let system = self.system_name(facts).await?;
                let mainland = self.deps.topology.is_mainland_connected(&system).await?;
                facts.mainland = Some(mainland);
            }
            Fact::Routes => {
                let system = self.system_name(facts).await?;
                facts.routes = Some(self.hub_routes(&system).await);
            }
        }
        Ok(())
    }

    async fn system_name(&self, facts: &mut StationFacts) -> Result<String> {
        if facts.location.is_none() {
            facts.location = Some(self.deps.locations.location(facts.station_id()).await?);
        }
        Ok(facts
            .location
            .as_ref()
            .map(|l| l.system_name.clone())
            .unwrap_or_default())
    }

    async fn appraisal_link(&self, bundle: &StationBundle) -> Result<String> {
        let mut type_ids: Vec<TypeId> = bundle.items.iter().map(|r| r.item.type_id).collect();
        type_ids.sort_unstable();
        type_ids.dedup();

        let lookups = type_ids
            .iter()
            .map(|&type_id| self.deps.item_types.item_type(type_id));
        let infos = try_join_all(lookups).await?;
        let names: HashMap<TypeId, String> = type_ids
            .into_iter()
            .zip(infos)
            .map(|(type_id, info)| (type_id, info.name))
            .collect();

        let lines: Vec<AppraisalLine> = bundle
            .items
            .iter()
            .map(|resolved| AppraisalLine {
                name: names.get(&resolved.item.type_id).cloned().unwrap_or_default(),
                quantity: resolved.item.quantity,
            })
            .collect();
        self.deps.pricing.appraisal_link(&lines).await
    }

    async fn has_fitted_ship(&self, bundle: &StationBundle) -> Result<bool> {
        let mut seen = HashSet::new();
        for item in bundle.singletons() {
            if !seen.insert(item.type_id) {
                continue;
            }
            if self.deps.item_types.item_type(item.type_id).await?.is_ship {
                info!(station_id = %bundle.station_id, type_id = %item.type_id, "Contains a fitted ship");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Routes to every hub, asked concurrently. A hub whose lookup fails
    /// is left out like an unreachable one.
    async fn hub_routes(&self, origin: &str) -> RouteSet {
        let lookups = self.hubs.iter().map(|hub| self.deps.routes.route(origin, hub));
        let routes = join_all(lookups)
            .await
            .into_iter()
            .zip(&self.hubs)
            .filter_map(|(outcome, hub)| match outcome {
                Ok(route) => route,
                Err(err) => {
                    warn!(origin, destination = %hub.system_name, error = %err, "Route lookup failed");
                    None
                }
            })
            .collect();
        RouteSet::new(routes)
    }
}

/// Attribute `err` to `station_id`. Errors already raised for a station
/// keep their original reason.
fn station_failure(station_id: StationId, err: Error) -> Error {
    match err {
        Error::Classification { .. } => err,
        other => Error::Classification {
            station_id: station_id.get(),
            reason: other.to_string(),
        },
    }
}
