//! Inventory, valuation and classification types plus the pure algorithms
//! over them. Nothing in here performs I/O.

mod grouper;
mod ids;
mod item;
mod location;
mod record;
mod resolver;
mod result;
mod route;
mod valuation;

pub mod classifier;

pub use grouper::{GroupingConfig, StationGrouper};
pub use ids::{ItemId, StationId, SystemId, TypeId};
pub use item::{InventoryItem, ResolvedItem, StationBundle};
pub use location::{ItemTypeInfo, LocationInfo};
pub use resolver::{resolve_stations, LocationResolver};
pub use record::{rank_for_display, JobState, JobStatus, RunId, StoredResult};
pub use result::{BundleSummary, Category, CategoryCounts, ClassificationResult};
pub use route::{Hub, RouteInfo, RouteSet};
pub use valuation::{AppraisalLine, Fingerprint, ValuationTotals};

pub use classifier::{ClassifierConfig, Decision, Fact, Rule, StationClassifier, StationFacts};
