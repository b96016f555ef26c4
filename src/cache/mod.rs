//! Cache-aside wrappers that put a [`KeyValueStore`](crate::port::KeyValueStore)
//! in front of the slow oracles.
//!
//! Concurrent misses on the same key are not coalesced; duplicate oracle
//! calls are idempotent and the last write wins.

mod catalog;
mod route;
mod valuation;

pub use catalog::{ItemTypeCache, LocationCache};
pub use route::RouteCache;
pub use valuation::ValuationCache;
