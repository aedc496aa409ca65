//! Sheets v4 REST client.
//!
//! Each fetch makes two calls: `spreadsheets.get` for the metadata, then
//! `spreadsheets.values.get` for the configured range. The metadata is only
//! logged, but a failure there still fails the fetch.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use url::Url;

use sheetgate_core::constants::{DEFAULT_RANGE, SHEETS_API_BASE_URL, SHEETS_READONLY_SCOPE};
use sheetgate_core::error::{Result, SheetError};
use sheetgate_core::traits::SheetFetcher;
use sheetgate_core::types::Grid;

use crate::auth::{ServiceAccountAuth, TokenSource};
use crate::types::{SpreadsheetMetadata, ValueRange};

/// Sheets client configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// API root, overridable for tests
    pub api_base_url: String,
    /// A1 range read by [`SheetFetcher::fetch_grid`]
    pub range: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_base_url: SHEETS_API_BASE_URL.into(),
            range: DEFAULT_RANGE.into(),
            timeout_seconds: 30,
        }
    }
}

impl SheetsConfig {
    /// Points the client at a different API root.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Reads a different range.
    pub fn with_range(mut self, range: impl Into<String>) -> Self {
        self.range = range.into();
        self
    }
}

/// Google Sheets v4 client.
pub struct SheetsClient {
    config: SheetsConfig,
    http: reqwest::Client,
    auth: Arc<dyn TokenSource>,
}

impl SheetsClient {
    /// Creates a client that authenticates through `auth`.
    pub fn new(config: SheetsConfig, auth: Arc<dyn TokenSource>) -> Result<Self> {
        let http = build_http_client(config.timeout_seconds)?;
        Ok(Self { config, http, auth })
    }

    /// Creates a client authenticating with the service-account key at
    /// `credentials_path`, using the read-only Sheets scope.
    pub fn with_service_account(config: SheetsConfig, credentials_path: impl Into<PathBuf>) -> Result<Self> {
        let http = build_http_client(config.timeout_seconds)?;
        let auth = ServiceAccountAuth::from_file(credentials_path, SHEETS_READONLY_SCOPE, http.clone());
        Ok(Self {
            config,
            http,
            auth: Arc::new(auth),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// `GET /v4/spreadsheets/{id}`
    #[instrument(skip(self))]
    pub async fn get_metadata(&self, spreadsheet_id: &str) -> Result<SpreadsheetMetadata> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id])?;
        self.get_json(url).await
    }

    /// `GET /v4/spreadsheets/{id}/values/{range}`
    #[instrument(skip(self))]
    pub async fn get_values(&self, spreadsheet_id: &str, range: &str) -> Result<ValueRange> {
        let url = self.endpoint(&["v4", "spreadsheets", spreadsheet_id, "values", range])?;
        self.get_json(url).await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.api_base_url)
            .map_err(|e| SheetError::Config(format!("invalid Sheets API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetError::Config("Sheets API URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let token = self.auth.access_token().await?;

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await
            .map_err(|e| SheetError::Remote(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(SheetError::from_status(status.as_u16(), text));
        }

        response
            .json()
            .await
            .map_err(|e| SheetError::Remote(format!("invalid response body: {}", e)))
    }
}

fn build_http_client(timeout_seconds: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_seconds))
        .build()
        .map_err(|e| SheetError::Config(format!("failed to create HTTP client: {}", e)))
}

#[async_trait]
impl SheetFetcher for SheetsClient {
    #[instrument(skip(self))]
    async fn fetch_grid(&self, spreadsheet_id: &str) -> Result<Grid> {
        let metadata = self.get_metadata(spreadsheet_id).await?;
        debug!(
            title = %metadata.properties.title,
            sheets = metadata.sheets.len(),
            "Fetched spreadsheet metadata"
        );

        let values = self.get_values(spreadsheet_id, &self.config.range).await?;
        info!(range = %values.range, rows = values.values.len(), "Fetched sheet values");

        Ok(values.values)
    }
}
