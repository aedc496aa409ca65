//! TTL cache for Sheetgate datasets.
//!
//! Generic in-memory cache with lazy, per-entry expiration.

mod cache;

pub use cache::{CacheConfig, CacheStats, TtlCache};
