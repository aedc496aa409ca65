//! In-memory fetcher for handler and router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use sheetgate_core::error::{Result, SheetError};
use sheetgate_core::traits::SheetFetcher;
use sheetgate_core::types::Grid;

/// Serves a fixed grid, or fails, and counts how often it was asked.
pub struct MockFetcher {
    grid: Option<Grid>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MockFetcher {
    fn new(grid: Option<Grid>, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            grid,
            delay,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn with_grid(rows: &[&[&str]]) -> Arc<Self> {
        Self::slow(rows, Duration::ZERO)
    }

    pub fn slow(rows: &[&[&str]], delay: Duration) -> Arc<Self> {
        let grid = rows
            .iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect();
        Self::new(Some(grid), delay)
    }

    pub fn failing() -> Arc<Self> {
        Self::new(None, Duration::ZERO)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SheetFetcher for MockFetcher {
    async fn fetch_grid(&self, spreadsheet_id: &str) -> Result<Grid> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.grid
            .clone()
            .ok_or_else(|| SheetError::Remote(format!("{} is unreachable", spreadsheet_id)))
    }
}
