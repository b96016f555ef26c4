//! Handler for the `run` command.

use std::sync::Arc;

use tracing::info;

use crate::adapter::MemoryStore;
use crate::app::{Oracles, Services};
use crate::cli::{output, RunArgs};
use crate::config::Config;
use crate::domain::Category;
use crate::error::Result;

/// Execute one classification run against the live services.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(ref level) = args.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();
    info!(config = %args.config.display(), "couriers starting");

    let oracles = Oracles::http(&config)?;
    let services = Services::build(&config, oracles, Arc::new(MemoryStore::new()));
    let report = services.runner.run().await?;

    let mut top = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let records = services.query.top(category, report.run_id, args.top).await?;
        top.push((category, records));
    }

    if args.json {
        println!("{}", output::report_json(&report, &top)?);
        return Ok(());
    }

    output::section("Run summary");
    output::key_value("Run", report.run_id);
    output::key_value("Classified", report.counts.total());
    output::key_value("Ignored", report.ignored);
    output::key_value("Failed", report.failed);
    println!();
    output::print_counts(&report.counts);
    output::print_top(&top);
    Ok(())
}
