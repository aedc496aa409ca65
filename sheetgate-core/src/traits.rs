//! Common traits for Sheetgate.
//!
//! The fetcher trait is the seam between the request handler and the remote
//! spreadsheet service, so the handler can be driven by an in-memory grid in
//! tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::Grid;

/// Source of raw spreadsheet grids.
#[async_trait]
pub trait SheetFetcher: Send + Sync {
    /// Returns the cells of the configured range of `spreadsheet_id`.
    ///
    /// An empty grid is returned when the range holds no values.
    async fn fetch_grid(&self, spreadsheet_id: &str) -> Result<Grid>;
}
