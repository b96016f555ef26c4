//! Result persistence port.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::store::{get_json, put_json, KeyValueStore};
use crate::domain::{Category, JobStatus, RunId, StoredResult};
use crate::error::Result;

/// Destination for classification results and run bookkeeping.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Persist one result. Results are write-once.
    async fn put_result(&self, record: &StoredResult) -> Result<()>;

    /// All live results of `run_id` in `category`.
    async fn results(&self, category: Category, run_id: RunId) -> Result<Vec<StoredResult>>;

    async fn status(&self) -> Result<JobStatus>;

    async fn set_status(&self, status: &JobStatus) -> Result<()>;
}

const STATUS_KEY: &str = "job#status";

/// [`ResultSink`] laid out over any [`KeyValueStore`].
///
/// Results live under `job#<category>#<run>#<record>` so one prefix query
/// returns a run's results for a category.
pub struct KvResultSink {
    store: Arc<dyn KeyValueStore>,
}

impl KvResultSink {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn prefix(category: Category, run_id: RunId) -> String {
        format!("job#{category}#{run_id}#")
    }
}

#[async_trait]
impl ResultSink for KvResultSink {
    async fn put_result(&self, record: &StoredResult) -> Result<()> {
        let key = format!("{}{}", Self::prefix(record.category, record.run_id), record.id);
        let ttl = (record.expires_at - record.created_at).to_std().ok();
        put_json(self.store.as_ref(), &key, record, ttl).await
    }

    async fn results(&self, category: Category, run_id: RunId) -> Result<Vec<StoredResult>> {
        let entries = self
            .store
            .query_prefix(&Self::prefix(category, run_id))
            .await?;
        debug!(%category, %run_id, count = entries.len(), "Loaded stored results");
        entries
            .into_iter()
            .map(|(_, value)| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }

    async fn status(&self) -> Result<JobStatus> {
        Ok(get_json(self.store.as_ref(), STATUS_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn set_status(&self, status: &JobStatus) -> Result<()> {
        put_json(self.store.as_ref(), STATUS_KEY, status, None).await
    }
}
