//! Read side: a run's results per category, in display order.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::{rank_for_display, Category, JobState, RunId, StoredResult};
use crate::error::Result;
use crate::port::ResultSink;

pub struct ResultQuery {
    sink: Arc<dyn ResultSink>,
}

impl ResultQuery {
    pub fn new(sink: Arc<dyn ResultSink>) -> Self {
        Self { sink }
    }

    /// Up to `limit` results of `run_id` in `category`, ranked.
    pub async fn top(&self, category: Category, run_id: RunId, limit: usize) -> Result<Vec<StoredResult>> {
        let mut results = self.sink.results(category, run_id).await?;
        rank_for_display(category, &mut results);
        results.truncate(limit);
        Ok(results)
    }

    /// Like [`top`](Self::top) for the last completed run. Empty while no
    /// run has completed.
    pub async fn latest(&self, category: Category, limit: usize) -> Result<Vec<StoredResult>> {
        let status = self.sink.status().await?;
        let completed = status.status == JobState::Ready && status.timestamp > DateTime::<Utc>::UNIX_EPOCH;
        match status.run_id {
            Some(run_id) if completed => self.top(category, run_id, limit).await,
            _ => Ok(Vec::new()),
        }
    }
}
