//! Key-value storage port.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// Exact-key storage with optional expiry.
///
/// Only per-key atomicity is required. Expired entries must not be
/// returned by `get` or `query_prefix`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>>;

    /// Insert or replace `key`. `ttl` of `None` keeps the entry forever.
    async fn put(&self, key: &str, value: Value, ttl: Option<Duration>) -> Result<()>;

    /// All live entries whose key starts with `prefix`, in key order.
    async fn query_prefix(&self, prefix: &str) -> Result<Vec<(String, Value)>>;
}

/// Read and decode a typed value.
pub async fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Encode and write a typed value.
pub async fn put_json<T: Serialize + Sync>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
    ttl: Option<Duration>,
) -> Result<()> {
    store.put(key, serde_json::to_value(value)?, ttl).await
}
