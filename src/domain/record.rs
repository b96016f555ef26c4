//! Persisted run artifacts: stored results and job status.

use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ids::StationId;
use super::result::{Category, ClassificationResult};

/// Identifier of one classification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(Uuid);

impl RunId {
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One classification result as written to the sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredResult {
    pub id: Uuid,
    pub run_id: RunId,
    pub station_id: StationId,
    pub category: Category,
    pub result: ClassificationResult,
    pub created_at: DateTime<Utc>,
    /// After this instant the storage layer may drop the record.
    pub expires_at: DateTime<Utc>,
}

impl StoredResult {
    pub fn new(
        run_id: RunId,
        station_id: StationId,
        result: ClassificationResult,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            run_id,
            station_id,
            category: result.category(),
            result,
            created_at: now,
            expires_at: now + ttl,
        }
    }
}

/// Order results the way they are presented for a category: most items
/// first for the high-count categories, highest collateral first for the
/// financial ones, arrival order otherwise.
pub fn rank_for_display(category: Category, results: &mut [StoredResult]) {
    match category {
        Category::HighCount | Category::IslandHighCount => {
            results.sort_by(|a, b| b.result.item_count().cmp(&a.result.item_count()));
        }
        Category::ItemExchange | Category::Problem => {}
        _ => results.sort_by(|a, b| {
            let a = a.result.collateral().unwrap_or(0.0);
            let b = b.result.collateral().unwrap_or(0.0);
            b.partial_cmp(&a).unwrap_or(Ordering::Equal)
        }),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    Ready,
    Working,
}

/// Bookkeeping for the most recent run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub status: JobState,
    pub timestamp: DateTime<Utc>,
    pub run_id: Option<RunId>,
}

impl JobStatus {
    /// No run has completed yet.
    #[must_use]
    pub fn idle() -> Self {
        Self {
            status: JobState::Ready,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            run_id: None,
        }
    }

    #[must_use]
    pub fn working(run_id: RunId, now: DateTime<Utc>) -> Self {
        Self {
            status: JobState::Working,
            timestamp: now,
            run_id: Some(run_id),
        }
    }

    #[must_use]
    pub fn completed(run_id: RunId, now: DateTime<Utc>) -> Self {
        Self {
            status: JobState::Ready,
            timestamp: now,
            run_id: Some(run_id),
        }
    }

    /// A failed run leaves no usable results; the epoch timestamp makes the
    /// next request refresh immediately.
    #[must_use]
    pub fn failed(run_id: RunId) -> Self {
        Self {
            status: JobState::Ready,
            timestamp: DateTime::<Utc>::UNIX_EPOCH,
            run_id: Some(run_id),
        }
    }

    #[must_use]
    pub fn is_working(&self) -> bool {
        self.status == JobState::Working
    }

    /// Whether a new run should start: nothing is running and the last
    /// completed run is older than `freshness`.
    #[must_use]
    pub fn needs_refresh(&self, now: DateTime<Utc>, freshness: Duration) -> bool {
        !self.is_working() && self.timestamp < now - freshness
    }
}

impl Default for JobStatus {
    fn default() -> Self {
        Self::idle()
    }
}
