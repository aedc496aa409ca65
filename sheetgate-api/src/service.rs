//! Cache-then-fetch dataset loading.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use sheetgate_cache::{CacheConfig, TtlCache};
use sheetgate_core::error::{Result, SheetError};
use sheetgate_core::mapper::into_sheet_data;
use sheetgate_core::traits::SheetFetcher;
use sheetgate_core::types::SheetData;

/// Loads datasets through the TTL cache.
///
/// Concurrent misses on one key wait on a per-key lock and re-check the
/// cache once they hold it, so a cold key costs a single remote fetch.
/// Failures are never cached.
pub struct DatasetService {
    fetcher: Arc<dyn SheetFetcher>,
    cache: TtlCache<Arc<SheetData>>,
    ttl: Duration,
    in_flight: DashMap<String, Arc<Mutex<()>>>,
}

impl DatasetService {
    /// Creates a service with an empty cache.
    pub fn new(fetcher: Arc<dyn SheetFetcher>, cache_config: CacheConfig) -> Self {
        let ttl = cache_config.default_ttl();
        Self {
            fetcher,
            cache: TtlCache::with_config(cache_config),
            ttl,
            in_flight: DashMap::new(),
        }
    }

    /// Returns the dataset stored under `key`, fetching `spreadsheet_id` on a miss.
    ///
    /// `spreadsheet_id` is `None` when the route's variable is unset, which
    /// fails with [`SheetError::Config`] unless the key is already cached.
    #[instrument(skip(self, spreadsheet_id))]
    pub async fn load(&self, key: &str, spreadsheet_id: Option<&str>) -> Result<Arc<SheetData>> {
        if let Some(data) = self.cache.get(key) {
            debug!("Cache hit");
            return Ok(data);
        }

        let spreadsheet_id = spreadsheet_id
            .ok_or_else(|| SheetError::Config(format!("no spreadsheet id configured for '{}'", key)))?;

        let lock = self.in_flight.entry(key.to_string()).or_default().clone();
        let _guard = lock.lock().await;

        if let Some(data) = self.cache.get(key) {
            debug!("Cache filled by concurrent request");
            return Ok(data);
        }

        debug!("Cache miss");
        let grid = self.fetcher.fetch_grid(spreadsheet_id).await?;
        let data = Arc::new(into_sheet_data(&grid)?);
        self.cache.set(key, data.clone(), self.ttl);

        info!(records = data.len(), ttl_seconds = self.ttl.as_secs(), "Cached dataset");
        Ok(data)
    }

    /// Number of unexpired cached datasets.
    pub fn cached_datasets(&self) -> usize {
        self.cache.stats().valid_entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    const ROSTER: &[&[&str]] = &[&["Name", "Age"], &["Alice", "30"]];

    fn service(fetcher: Arc<MockFetcher>) -> DatasetService {
        DatasetService::new(fetcher, CacheConfig::default())
    }

    #[tokio::test]
    async fn test_second_load_is_served_from_cache() {
        let fetcher = MockFetcher::with_grid(ROSTER);
        let service = service(fetcher.clone());

        let first = service.load("united-school", Some("sheet-a")).await.unwrap();
        let second = service.load("united-school", Some("sheet-a")).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.data[0]["Name"], "Alice");
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_entry_is_refetched_once() {
        let fetcher = MockFetcher::with_grid(ROSTER);
        let service = service(fetcher.clone());

        service.load("st-mary", Some("sheet-b")).await.unwrap();
        tokio::time::advance(Duration::from_secs(299)).await;
        service.load("st-mary", Some("sheet-b")).await.unwrap();
        assert_eq!(fetcher.calls(), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        service.load("st-mary", Some("sheet-b")).await.unwrap();
        service.load("st-mary", Some("sheet-b")).await.unwrap();
        assert_eq!(fetcher.calls(), 2);
    }

    #[tokio::test]
    async fn test_keys_are_cached_independently() {
        let fetcher = MockFetcher::with_grid(ROSTER);
        let service = service(fetcher.clone());

        service.load("united-school", Some("sheet-a")).await.unwrap();
        service.load("st-mary", Some("sheet-b")).await.unwrap();

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(service.cached_datasets(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_is_not_cached() {
        let fetcher = MockFetcher::failing();
        let service = service(fetcher.clone());

        let err = service.load("st-mary", Some("sheet-b")).await.unwrap_err();
        assert!(err.is_remote());
        assert!(service.load("st-mary", Some("sheet-b")).await.is_err());

        assert_eq!(fetcher.calls(), 2);
        assert_eq!(service.cached_datasets(), 0);
    }

    #[tokio::test]
    async fn test_empty_grid_is_malformed() {
        let fetcher = MockFetcher::with_grid(&[]);
        let service = service(fetcher.clone());

        let err = service.load("united-school", Some("sheet-a")).await.unwrap_err();
        assert!(matches!(err, SheetError::MalformedData(_)));
        assert_eq!(service.cached_datasets(), 0);
    }

    #[tokio::test]
    async fn test_missing_spreadsheet_id() {
        let fetcher = MockFetcher::with_grid(ROSTER);
        let service = service(fetcher.clone());

        let err = service.load("united-school", None).await.unwrap_err();
        assert!(matches!(err, SheetError::Config(_)));
        assert_eq!(fetcher.calls(), 0);
    }

    #[tokio::test]
    async fn test_max_ttl_loads_and_caches() {
        let fetcher = MockFetcher::with_grid(ROSTER);
        let config = CacheConfig {
            default_ttl_seconds: u64::MAX,
        };
        let service = DatasetService::new(fetcher.clone(), config);

        service.load("st-mary", Some("sheet-b")).await.unwrap();
        service.load("st-mary", Some("sheet-b")).await.unwrap();

        assert_eq!(fetcher.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_misses_share_one_fetch() {
        let fetcher = MockFetcher::slow(ROSTER, Duration::from_millis(50));
        let service = service(fetcher.clone());

        let (a, b) = tokio::join!(
            service.load("united-school", Some("sheet-a")),
            service.load("united-school", Some("sheet-a")),
        );

        assert_eq!(fetcher.calls(), 1);
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
    }
}
