//! Error types for Sheetgate.
//!
//! Every failure is tagged with the layer that produced it so logs can tell an
//! expired credential from an upstream outage, even though the HTTP surface
//! reports them all the same way.

use thiserror::Error;

/// Result type alias using `SheetError`.
pub type Result<T> = std::result::Result<T, SheetError>;

/// Main error type for all Sheetgate operations.
#[derive(Debug, Error)]
pub enum SheetError {
    // ═══════════════════════════════════════════════════════════════════════════
    // AUTHENTICATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Credential file missing or invalid, token exchange rejected, or the
    /// API refused the token (401/403).
    #[error("Authentication failed: {0}")]
    Auth(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // REMOTE SERVICE ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Transport failure or malformed response body.
    #[error("Spreadsheet service request failed: {0}")]
    Remote(String),

    /// Non-success status from the spreadsheet service.
    #[error("Spreadsheet service returned HTTP {status}: {body}")]
    RemoteStatus {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    // ═══════════════════════════════════════════════════════════════════════════
    // DATA ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// The grid cannot be mapped, e.g. it has no header row.
    #[error("Malformed sheet data: {0}")]
    MalformedData(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION & IO ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Missing or invalid configuration value.
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SheetError {
    /// Short label for the failure class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            SheetError::Auth(_) => "auth",
            SheetError::Remote(_) | SheetError::RemoteStatus { .. } => "remote",
            SheetError::MalformedData(_) => "malformed_data",
            SheetError::Config(_) => "config",
            SheetError::IoError(_) => "io",
            SheetError::JsonError(_) => "json",
        }
    }

    /// Returns true if the failure came from talking to the remote service.
    pub fn is_remote(&self) -> bool {
        matches!(self, SheetError::Remote(_) | SheetError::RemoteStatus { .. })
    }

    /// Maps an HTTP status from the spreadsheet service to an error.
    ///
    /// 401 and 403 mean the credentials or scope are wrong, everything else
    /// is treated as a remote service failure.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => SheetError::Auth(format!("HTTP {}: {}", status, body)),
            _ => SheetError::RemoteStatus { status, body },
        }
    }
}
