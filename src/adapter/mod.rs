//! Concrete implementations of the ports.
//!
//! - [`memory`]: in-process key-value store.
//! - [`esi`]: inventory snapshot and universe catalog.
//! - [`janice`]: pricing and appraisal links.
//! - [`redfrog`]: hub routes.
//! - [`mainland`]: mainland topology.
//!
//! The HTTP adapters share timeouts from [`HttpConfig`] and retry
//! transient failures per [`RetryConfig`].

pub mod esi;
pub mod janice;
pub mod mainland;
pub mod memory;
pub mod redfrog;
pub mod retry;

mod http;

pub use esi::{EsiClient, InventoryConfig};
pub use http::HttpConfig;
pub use janice::JaniceClient;
pub use mainland::MainlandClient;
pub use memory::MemoryStore;
pub use redfrog::RedFrogClient;
pub use retry::{with_retry, RetryConfig};
