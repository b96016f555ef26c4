//! Inventory snapshot port.

use async_trait::async_trait;

use crate::domain::InventoryItem;
use crate::error::Result;

/// Supplier of the full inventory snapshot.
///
/// Implementations handle pagination internally and return every record,
/// or [`Error::SourceUnavailable`](crate::error::Error::SourceUnavailable)
/// when the upstream cannot be reached.
#[async_trait]
pub trait InventorySource: Send + Sync {
    async fn fetch_all_items(&self) -> Result<Vec<InventoryItem>>;
}
