//! DTOs for API responses.
//!
//! Dataset responses serialize [`SheetData`](sheetgate_core::SheetData) directly.

use serde::Serialize;

/// Body of every failure response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Fixed, cause-independent message
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
    /// Datasets currently cached and unexpired
    pub cached_datasets: usize,
}
