//! Application layer: wires ports, caches and the classifier into runs.

mod builder;
mod pipeline;
mod query;
mod runner;

pub use builder::{Oracles, Services};
pub use pipeline::{PipelineDeps, StationPipeline};
pub use query::ResultQuery;
pub use runner::{ClassificationRunner, RunReport};
