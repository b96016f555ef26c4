//! Inputs to classification, gathered lazily.

use crate::domain::ids::StationId;
use crate::domain::item::StationBundle;
use crate::domain::location::LocationInfo;
use crate::domain::route::RouteSet;
use crate::domain::valuation::ValuationTotals;

/// A piece of station data that requires an oracle call to obtain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fact {
    /// Link to an external appraisal of the bundle.
    AppraisalLink,
    Location,
    /// Whether any singleton item is an assembled ship.
    FittedShip,
    Valuation,
    /// Whether the station's system connects to the hub network.
    Mainland,
    Routes,
}

/// Everything known about one station so far.
#[derive(Debug, Clone)]
pub struct StationFacts {
    bundle: StationBundle,
    pub appraisal_link: Option<String>,
    pub location: Option<LocationInfo>,
    pub has_fitted_ship: Option<bool>,
    pub totals: Option<ValuationTotals>,
    pub mainland: Option<bool>,
    pub routes: Option<RouteSet>,
}

impl StationFacts {
    pub fn new(bundle: StationBundle) -> Self {
        Self {
            bundle,
            appraisal_link: None,
            location: None,
            has_fitted_ship: None,
            totals: None,
            mainland: None,
            routes: None,
        }
    }

    #[must_use]
    pub fn bundle(&self) -> &StationBundle {
        &self.bundle
    }

    #[must_use]
    pub fn station_id(&self) -> StationId {
        self.bundle.station_id
    }

    #[must_use]
    pub fn item_count(&self) -> usize {
        self.bundle.item_count()
    }

    pub fn appraisal_link(&self) -> Result<&str, Fact> {
        self.appraisal_link.as_deref().ok_or(Fact::AppraisalLink)
    }

    pub fn location(&self) -> Result<&LocationInfo, Fact> {
        self.location.as_ref().ok_or(Fact::Location)
    }

    pub fn has_fitted_ship(&self) -> Result<bool, Fact> {
        self.has_fitted_ship.ok_or(Fact::FittedShip)
    }

    pub fn totals(&self) -> Result<&ValuationTotals, Fact> {
        self.totals.as_ref().ok_or(Fact::Valuation)
    }

    pub fn is_mainland(&self) -> Result<bool, Fact> {
        self.mainland.ok_or(Fact::Mainland)
    }

    pub fn routes(&self) -> Result<&RouteSet, Fact> {
        self.routes.as_ref().ok_or(Fact::Routes)
    }
}
