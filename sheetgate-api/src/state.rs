//! App state: configuration and the dataset service.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use sheetgate_cache::CacheConfig;
use sheetgate_core::constants::{
    CACHE_TTL_SECONDS, DEFAULT_CREDENTIALS_FILE, DEFAULT_PORT, DEFAULT_RANGE, ST_MARY_KEY,
    UNITED_SCHOOL_KEY,
};
use sheetgate_core::error::Result;
use sheetgate_core::traits::SheetFetcher;
use sheetgate_sheets::{SheetsClient, SheetsConfig};

use crate::service::DatasetService;

/// Dataset keys served by the fixed routes.
pub const DATASETS: [&str; 2] = [UNITED_SCHOOL_KEY, ST_MARY_KEY];

/// Server configuration, normally read from the environment.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Spreadsheet behind `/united-school` (`UNITED_SCHOOL`)
    pub united_school_id: Option<String>,
    /// Spreadsheet behind `/st-mary` (`ST_MARY`)
    pub st_mary_id: Option<String>,
    /// Service-account key file (`GOOGLE_CREDENTIALS_PATH`)
    pub credentials_path: PathBuf,
    /// A1 range read from each spreadsheet (`SHEET_RANGE`)
    pub range: String,
    /// Listening port (`PORT`)
    pub port: u16,
    /// Dataset cache lifetime in seconds (`CACHE_TTL_SECONDS`)
    pub cache_ttl_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            united_school_id: None,
            st_mary_id: None,
            credentials_path: PathBuf::from(DEFAULT_CREDENTIALS_FILE),
            range: DEFAULT_RANGE.into(),
            port: DEFAULT_PORT,
            cache_ttl_seconds: CACHE_TTL_SECONDS,
        }
    }
}

impl ApiConfig {
    /// Reads the configuration from the environment, loading `.env` first.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        Self {
            united_school_id: var("UNITED_SCHOOL").filter(|v| !v.is_empty()),
            st_mary_id: var("ST_MARY").filter(|v| !v.is_empty()),
            credentials_path: var("GOOGLE_CREDENTIALS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.credentials_path),
            range: var("SHEET_RANGE").unwrap_or(defaults.range),
            port: var("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.port),
            cache_ttl_seconds: var("CACHE_TTL_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_ttl_seconds),
        }
    }

    /// Spreadsheet id bound to a dataset key, if the key is known and its
    /// variable is set.
    pub fn spreadsheet_id(&self, key: &str) -> Option<&str> {
        match key {
            UNITED_SCHOOL_KEY => self.united_school_id.as_deref(),
            ST_MARY_KEY => self.st_mary_id.as_deref(),
            _ => None,
        }
    }

    fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl_seconds: self.cache_ttl_seconds,
        }
    }
}

/// Shared state handed to every handler.
pub struct AppState {
    /// Configuration the state was built from
    pub config: ApiConfig,
    /// Cached dataset loader
    pub datasets: DatasetService,
    /// Process start, reported by `/health`
    pub started_at: Instant,
}

impl AppState {
    /// Builds the state with a Sheets client using the configured key file.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let sheets = SheetsClient::with_service_account(
            SheetsConfig::default().with_range(&config.range),
            &config.credentials_path,
        )?;
        Ok(Self::with_fetcher(config, Arc::new(sheets)))
    }

    /// Builds the state around any grid source.
    pub fn with_fetcher(config: ApiConfig, fetcher: Arc<dyn SheetFetcher>) -> Self {
        let datasets = DatasetService::new(fetcher, config.cache_config());
        Self {
            config,
            datasets,
            started_at: Instant::now(),
        }
    }
}
