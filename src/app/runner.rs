//! One classification run over the full inventory snapshot.

use std::sync::Arc;

use chrono::{Duration, Utc};
use tokio::task::JoinSet;
use tracing::{info, warn};

use super::pipeline::StationPipeline;
use crate::domain::{
    resolve_stations, CategoryCounts, ClassificationResult, JobStatus, RunId, StationGrouper,
    StationId, StoredResult,
};
use crate::error::Result;
use crate::port::{InventorySource, ResultSink};

/// Outcome of a completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: RunId,
    /// Per-category totals, zero counts included.
    pub counts: CategoryCounts,
    pub results: Vec<StoredResult>,
    /// Stations settled without a result.
    pub ignored: usize,
    /// Stations whose classification failed and were dropped.
    pub failed: usize,
}

/// Fans classification out over every station bundle.
pub struct ClassificationRunner {
    source: Arc<dyn InventorySource>,
    grouper: StationGrouper,
    pipeline: Arc<StationPipeline>,
    sink: Arc<dyn ResultSink>,
    result_ttl: Duration,
}

impl ClassificationRunner {
    pub fn new(
        source: Arc<dyn InventorySource>,
        grouper: StationGrouper,
        pipeline: Arc<StationPipeline>,
        sink: Arc<dyn ResultSink>,
        result_ttl: Duration,
    ) -> Self {
        Self {
            source,
            grouper,
            pipeline,
            sink,
            result_ttl,
        }
    }

    /// Run once. Only a blocking failure (snapshot unavailable, cyclic
    /// containment, storage failure) is returned as an error; station
    /// failures just reduce the counts.
    pub async fn run(&self) -> Result<RunReport> {
        let run_id = RunId::generate();
        self.sink
            .set_status(&JobStatus::working(run_id, Utc::now()))
            .await?;
        info!(%run_id, "Classification run started");

        match self.execute(run_id).await {
            Ok(report) => {
                self.sink
                    .set_status(&JobStatus::completed(run_id, Utc::now()))
                    .await?;
                info!(
                    %run_id,
                    results = report.results.len(),
                    ignored = report.ignored,
                    failed = report.failed,
                    "Classification run finished"
                );
                Ok(report)
            }
            Err(err) => {
                warn!(%run_id, error = %err, "Classification run failed");
                if let Err(status_err) = self.sink.set_status(&JobStatus::failed(run_id)).await {
                    warn!(%run_id, error = %status_err, "Failed to record run failure");
                }
                Err(err)
            }
        }
    }

    /// Run unless a run is in progress or the last one completed within
    /// `freshness`. Returns `None` when skipped.
    pub async fn run_if_stale(&self, freshness: Duration) -> Result<Option<RunReport>> {
        let status = self.sink.status().await?;
        if !status.needs_refresh(Utc::now(), freshness) {
            info!(
                working = status.is_working(),
                last_run = %status.timestamp,
                "Results are fresh, skipping run"
            );
            return Ok(None);
        }
        self.run().await.map(Some)
    }

    async fn execute(&self, run_id: RunId) -> Result<RunReport> {
        let snapshot = self.source.fetch_all_items().await?;
        info!(items = snapshot.len(), "Fetched inventory snapshot");

        let resolved = resolve_stations(&snapshot)?;
        let bundles = self.grouper.group(resolved);
        info!(stations = bundles.len(), "Grouped items by station");

        let mut tasks = JoinSet::new();
        for (station_id, bundle) in bundles {
            let pipeline = self.pipeline.clone();
            tasks.spawn(async move { (station_id, pipeline.process(bundle).await) });
        }

        let mut classified: Vec<(StationId, ClassificationResult)> = Vec::new();
        let mut ignored = 0;
        let mut failed = 0;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((station_id, Ok(Some(result)))) => classified.push((station_id, result)),
                Ok((_, Ok(None))) => ignored += 1,
                Ok((station_id, Err(err))) => {
                    failed += 1;
                    warn!(%station_id, error = %err, "Station classification failed");
                }
                Err(err) => {
                    failed += 1;
                    warn!(error = %err, "Station task aborted");
                }
            }
        }

        let counts = CategoryCounts::tally(classified.iter().map(|(_, r)| r));
        let now = Utc::now();
        let mut results = Vec::with_capacity(classified.len());
        for (station_id, result) in classified {
            let record = StoredResult::new(run_id, station_id, result, now, self.result_ttl);
            self.sink.put_result(&record).await?;
            results.push(record);
        }

        Ok(RunReport {
            run_id,
            counts,
            results,
            ignored,
            failed,
        })
    }
}
